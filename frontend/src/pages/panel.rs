use std::rc::Rc;

use gloo::timers::callback::Interval;
use shared::session::{self, switched_notice, LOGOUT_PROMPT, SWITCH_FAILED};
use shared::{Entity, GatewayError, LoadGuard, PanelConfig, SessionUser, Severity};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::{FollowUp, PanelContext};
use crate::gateway::{BrowserGateway, Notifier};
use crate::utils;
use crate::{switch, Route};

/// Sidebar, top bar and the routed page. Nothing below the shell renders
/// until the session check has passed.
#[function_component(PanelShell)]
pub fn panel_shell() -> Html {
    let notifier = use_context::<Notifier>().expect("PanelShell rendered outside NotificationHost");
    let config = use_memo((), |_| PanelConfig::from_build_env());
    let gateway = {
        let config = config.clone();
        let notifier = notifier.clone();
        (*use_memo((), move |_| BrowserGateway::new(config, notifier))).clone()
    };
    let guard = {
        let scope = config.guard_scope;
        (*use_memo((), move |_| LoadGuard::new(scope))).clone()
    };
    let follow_up = (*use_memo((), |_| FollowUp::default())).clone();

    let user = use_state(|| None::<Rc<SessionUser>>);
    let online = use_state(|| None::<i64>);
    let navigator = use_navigator().expect("PanelShell rendered outside a router");
    let route = use_route::<Route>().unwrap_or(Route::Admins);

    // Session check
    {
        let gateway = gateway.clone();
        let user = user.clone();
        let login_page = config.login_page.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match session::check_session(&gateway).await {
                    Ok(admin) => {
                        log::info!("Signed in as {}", admin.name);
                        user.set(Some(Rc::new(admin)));
                    }
                    Err(e) => {
                        log::info!("No admin session ({}), leaving for login", e);
                        utils::redirect(&login_page);
                    }
                }
            });
            || ()
        });
    }

    let server = (*user)
        .as_ref()
        .map(|u| u.server_or(&config.default_server).to_string());

    // Online counter, refreshed while the session's server stays the same
    {
        let gateway = gateway.clone();
        let online = online.clone();
        let period = config.online_poll_ms;
        use_effect_with(server.clone(), move |server| {
            let interval = server.clone().map(|server| {
                let refresh = Callback::from(move |_: ()| {
                    let gateway = gateway.clone();
                    let online = online.clone();
                    let server = server.clone();
                    spawn_local(async move {
                        match session::online_count(&gateway, &server).await {
                            Ok(count) => online.set(Some(count)),
                            Err(e) => log::warn!("Failed to refresh online count: {}", e),
                        }
                    });
                });
                refresh.emit(());
                Interval::new(period, move || refresh.emit(()))
            });
            move || drop(interval)
        });
    }

    let on_logout = {
        let gateway = gateway.clone();
        let login_page = config.login_page.clone();
        Callback::from(move |_: MouseEvent| {
            if !utils::confirm(LOGOUT_PROMPT) {
                return;
            }
            let gateway = gateway.clone();
            let login_page = login_page.clone();
            spawn_local(async move {
                match session::logout(&gateway).await {
                    Ok(()) => utils::redirect(&login_page),
                    Err(e) => log::warn!("Logout failed: {}", e),
                }
            });
        })
    };

    let on_switch = {
        let gateway = gateway.clone();
        let user = user.clone();
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        let follow_up = follow_up.clone();
        let default_server = config.default_server.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let target = select.value();
            let Some(current) = (*user).clone() else {
                return;
            };
            let previous = current.server_or(&default_server).to_string();
            if target == previous {
                return;
            }

            let gateway = gateway.clone();
            let user = user.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let follow_up = follow_up.clone();
            spawn_local(async move {
                match session::switch_server(&gateway, &target).await {
                    Ok(()) => {
                        log::info!("Switched server {} -> {}", previous, target);
                        // Announced after the admins reload settles
                        follow_up.set(switched_notice(&target), Severity::Success);
                        let mut updated = (*current).clone();
                        updated.server = Some(target.clone());
                        user.set(Some(Rc::new(updated)));
                        navigator.push(&Route::Admins);
                    }
                    Err(e) => {
                        log::warn!("Server switch to {} failed: {}", target, e);
                        if e != GatewayError::Unauthorized {
                            notifier.emit((SWITCH_FAILED.to_string(), Severity::Error));
                        }
                        select.set_value(&previous);
                    }
                }
            });
        })
    };

    let Some(current_user) = (*user).clone() else {
        return html! {
            <div class="loading-screen">
                <i class="fas fa-spinner fa-spin"></i>
                <span>{ "Проверка сессии..." }</span>
            </div>
        };
    };
    let current_server = server.unwrap_or_else(|| config.default_server.clone());

    let mut servers = config.servers.clone();
    if !servers.contains(&current_server) {
        servers.push(current_server.clone());
    }

    let nav_item = |entity: Entity| {
        let target = Route::for_entity(entity);
        let active = route.entity() == Some(entity);
        html! {
            <li class={classes!("nav-item", active.then_some("active"))}>
                <Link<Route> to={target}>
                    <i class={entity.icon()}></i>
                    <span>{ entity.title() }</span>
                </Link<Route>>
            </li>
        }
    };

    let context = PanelContext {
        config: config.clone(),
        gateway,
        guard,
        user: current_user.clone(),
        notifier,
        follow_up,
    };

    html! {
        <ContextProvider<PanelContext> {context}>
            <div class="panel-layout">
                <aside class="sidebar">
                    <div class="user-profile">
                        <div class="user-avatar">{ current_user.avatar_letter() }</div>
                        <div class="user-details">
                            <div class="username">{ &current_user.name }</div>
                            <div class="user-role">{ current_user.role_label() }</div>
                        </div>
                    </div>
                    <ul class="nav-menu">
                        { for Entity::ALL.into_iter().map(nav_item) }
                    </ul>
                    <button class="logout-btn" onclick={on_logout}>
                        <i class="fas fa-sign-out-alt"></i>{ " Выйти" }
                    </button>
                </aside>
                <main class="main-content">
                    <header class="top-bar">
                        <div class="online-status">
                            <span class="status-dot"></span>
                            <span class="status-text">{ format!("Server: {}", current_server) }</span>
                        </div>
                        <select class="server-switcher gaming-input" onchange={on_switch}>
                            { for servers.iter().map(|s| html! {
                                <option value={s.clone()} selected={*s == current_server}>
                                    { s }
                                </option>
                            }) }
                        </select>
                        <div class="online-count">
                            <i class="fas fa-users"></i>
                            { " Онлайн: " }
                            { (*online).map(|n| n.to_string()).unwrap_or_else(|| "—".to_string()) }
                        </div>
                    </header>
                    <Switch<Route> render={switch} />
                </main>
            </div>
        </ContextProvider<PanelContext>>
    }
}
