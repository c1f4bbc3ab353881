mod components;
mod context;
mod gateway;
mod pages;
pub mod utils;

use components::NotificationHost;
use pages::{EntityPage, PanelShell};
use shared::{AdminRecord, Entity, LogRecord, NameChangeRecord, PanelConfig, ReputationRecord};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Admins,
    #[at("/logs")]
    Logs,
    #[at("/reputation")]
    Reputation,
    #[at("/names")]
    Names,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Route::Admins => Some(Entity::Admins),
            Route::Logs => Some(Entity::Logs),
            Route::Reputation => Some(Entity::Reputation),
            Route::Names => Some(Entity::Names),
            Route::NotFound => None,
        }
    }

    pub fn for_entity(entity: Entity) -> Self {
        match entity {
            Entity::Admins => Route::Admins,
            Entity::Logs => Route::Logs,
            Entity::Reputation => Route::Reputation,
            Entity::Names => Route::Names,
        }
    }
}

pub(crate) fn switch(routes: Route) -> Html {
    match routes {
        Route::Admins => html! { <EntityPage<AdminRecord> /> },
        Route::Logs => html! { <EntityPage<LogRecord> /> },
        Route::Reputation => html! { <EntityPage<ReputationRecord> /> },
        Route::Names => html! { <EntityPage<NameChangeRecord> /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Admins} /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    let lifetime_ms = *use_memo((), |_| PanelConfig::from_build_env().notice_lifetime_ms);

    html! {
        <HashRouter>
            <NotificationHost {lifetime_ms}>
                <PanelShell />
            </NotificationHost>
        </HashRouter>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_entities() {
        for entity in Entity::ALL {
            assert_eq!(Route::for_entity(entity).entity(), Some(entity));
        }
        assert_eq!(Route::NotFound.entity(), None);
    }

    #[test]
    fn hash_paths() {
        assert_eq!(Route::Admins.to_path(), "/");
        assert_eq!(Route::Logs.to_path(), "/logs");
        assert_eq!(Route::Reputation.to_path(), "/reputation");
        assert_eq!(Route::Names.to_path(), "/names");
    }
}
