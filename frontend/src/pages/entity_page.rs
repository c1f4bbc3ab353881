//! One listing page (admins, logs, reputation or name changes)
//!
//! The page owns its filters and page number. Every change to those, the
//! session's server, or an explicit search re-runs the load effect, which
//! claims the shared guard before anything is sent.

use std::marker::PhantomData;

use shared::{
    fetch_page, FilterField, Filters, LoadOutcome, LoadState, Pager, PageQuery, ReleaseWatch,
    Severity,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, HtmlInputElement};
use yew::prelude::*;

use crate::components::{Pagination, RecordView};
use crate::context::PanelContext;

pub const LOAD_ERROR_TEXT: &str = "Ошибка загрузки данных";
pub const EMPTY_TEXT: &str = "Записи не найдены";

#[derive(Properties)]
pub struct EntityPageProps<R: RecordView> {
    #[prop_or_default]
    _record: PhantomData<R>,
}

impl<R: RecordView> PartialEq for EntityPageProps<R> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[function_component(EntityPage)]
pub fn entity_page<R: RecordView>(_props: &EntityPageProps<R>) -> Html {
    let ctx = use_context::<PanelContext>().expect("EntityPage rendered outside the panel");
    let entity = R::ENTITY;

    let page = use_state(|| 1u32);
    let draft = use_mut_ref(Filters::new);
    let applied = use_state(Filters::new);
    let reload = use_state(|| 0u32);
    let load_state = use_state(LoadState::default);
    let records = use_state(Vec::<R>::new);
    let pager = use_state(|| None::<Pager>);
    let abort = use_mut_ref(|| None::<AbortController>);
    let pending_retry = use_mut_ref(|| None::<ReleaseWatch>);

    // Abort whatever is still in flight when the page goes away
    {
        let abort = abort.clone();
        let pending_retry = pending_retry.clone();
        use_effect_with((), move |_| {
            move || {
                pending_retry.borrow_mut().take();
                if let Some(controller) = abort.borrow_mut().take() {
                    controller.abort();
                }
            }
        });
    }

    {
        let ctx = ctx.clone();
        let load_state = load_state.clone();
        let records = records.clone();
        let pager = pager.clone();
        let abort = abort.clone();
        let pending_retry = pending_retry.clone();
        let reload = reload.clone();
        let never_loaded = *load_state == LoadState::Idle;
        use_effect_with(
            (*page, (*applied).clone(), ctx.server(), *reload),
            move |(page_no, filters, server, nonce)| {
                match ctx.guard.try_acquire(entity) {
                    None if never_loaded => {
                        // Nothing on screen yet: try again once the guard frees up
                        log::debug!("{} load waiting for the guard", entity.key());
                        let next = nonce + 1;
                        let slot = pending_retry.clone();
                        let watch = ctx.guard.watch_release(move || {
                            if slot.borrow_mut().take().is_some() {
                                reload.set(next);
                            }
                        });
                        *pending_retry.borrow_mut() = Some(watch);
                    }
                    None => {
                        log::debug!("{} load already in flight, request dropped", entity.key());
                    }
                    Some(ticket) => {
                        let query = PageQuery::new(entity, *page_no, filters.clone(), server.clone());
                        let controller = AbortController::new().ok();
                        let gateway = match &controller {
                            Some(c) => ctx.gateway.with_signal(c.signal()),
                            None => ctx.gateway.clone(),
                        };
                        *abort.borrow_mut() = controller;
                        load_state.set(LoadState::Loading);

                        spawn_local(async move {
                            let outcome = fetch_page::<R, _>(&gateway, &query, ticket).await;
                            let settled = outcome.settled_state();
                            match outcome {
                                LoadOutcome::Rendered(loaded) => {
                                    ctx.notify(loaded.notice, Severity::Success);
                                    records.set(loaded.records);
                                    pager.set(loaded.pager);
                                }
                                LoadOutcome::Errored { message } => {
                                    ctx.notify(message, Severity::Error);
                                    records.set(Vec::new());
                                    pager.set(None);
                                }
                                LoadOutcome::Cancelled => {
                                    log::debug!("{} load cancelled", entity.key());
                                }
                                LoadOutcome::Skipped | LoadOutcome::Redirected => {}
                            }
                            if let Some(state) = settled {
                                load_state.set(state);
                                ctx.flush_follow_up();
                            }
                        });
                    }
                }
                || ()
            },
        );
    }

    let submit = {
        let draft = draft.clone();
        let applied = applied.clone();
        let page = page.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            applied.set(draft.borrow().clone());
            page.set(1);
            reload.set(*reload + 1);
        })
    };

    let filter_input = |field: &'static FilterField| {
        let oninput = {
            let draft = draft.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                draft.borrow_mut().set(field.param, &input.value());
            })
        };
        let onkeydown = {
            let submit = submit.clone();
            Callback::from(move |e: KeyboardEvent| {
                if e.key() == "Enter" {
                    e.prevent_default();
                    submit.emit(());
                }
            })
        };
        html! {
            <input
                type="text"
                class="gaming-input"
                id={field.input_id}
                placeholder={field.placeholder}
                {oninput}
                {onkeydown}
            />
        }
    };

    let on_search = {
        let submit = submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(()))
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let body = match *load_state {
        LoadState::Idle | LoadState::Loading => R::placeholder("loading", entity.loading_text()),
        LoadState::Errored => R::placeholder("error", LOAD_ERROR_TEXT),
        LoadState::Rendered if records.is_empty() => R::placeholder("empty", EMPTY_TEXT),
        LoadState::Rendered => R::render(&records, &ctx.config),
    };

    let pagination = match (*pager, *load_state) {
        (Some(pager), state) if state != LoadState::Errored => html! {
            <Pagination
                {pager}
                busy={state == LoadState::Loading}
                on_page={on_page}
            />
        },
        _ => html! {},
    };

    html! {
        <section class="content-section" id={format!("{}-section", entity.key())}>
            <div class="section-header">
                <h2><i class={entity.icon()}></i>{ " " }{ entity.title() }</h2>
                <div class="filters">
                    { for entity.filter_fields().iter().map(filter_input) }
                    <button class="gaming-btn" onclick={on_search}>
                        <i class="fas fa-search"></i>{ " Поиск" }
                    </button>
                </div>
            </div>
            { R::frame(body) }
            { pagination }
        </section>
    }
}
