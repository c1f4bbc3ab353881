use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::{NotificationSlot, Severity};
use yew::prelude::*;

use crate::gateway::Notifier;

enum SlotAction {
    Show(String, Severity),
    Dismiss(u64),
    Expire(u64, u32),
}

#[derive(PartialEq)]
struct SlotState(NotificationSlot);

impl Reducible for SlotState {
    type Action = SlotAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut slot = self.0.clone();
        match action {
            SlotAction::Show(message, severity) => {
                slot.show(message, severity);
            }
            SlotAction::Dismiss(id) => {
                if !slot.dismiss(id) {
                    return self;
                }
            }
            SlotAction::Expire(id, elapsed_ms) => {
                if !slot.expire(id, elapsed_ms) {
                    return self;
                }
            }
        }
        Rc::new(SlotState(slot))
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub lifetime_ms: u32,
    #[prop_or_default]
    pub children: Html,
}

/// Owns the single notification banner and hands a [`Notifier`] to
/// everything below it.
#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let state = {
        let lifetime_ms = props.lifetime_ms;
        use_reducer(move || SlotState(NotificationSlot::with_lifetime(lifetime_ms)))
    };

    let notifier: Notifier = {
        let dispatcher = state.dispatcher();
        (*use_memo((), move |_| {
            Callback::from(move |(message, severity): (String, Severity)| {
                dispatcher.dispatch(SlotAction::Show(message, severity));
            })
        }))
        .clone()
    };

    // Auto-dismiss; a newer notice restarts the timer
    {
        let dispatcher = state.dispatcher();
        let current_id = state.0.current().map(|n| n.id);
        let lifetime = state.0.lifetime_ms();
        use_effect_with(current_id, move |current_id| {
            let timeout = current_id.map(|id| {
                Timeout::new(lifetime, move || {
                    dispatcher.dispatch(SlotAction::Expire(id, lifetime));
                })
            });
            move || drop(timeout)
        });
    }

    let banner = state.0.current().map(|notice| {
        let id = notice.id;
        let on_close = {
            let dispatcher = state.dispatcher();
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(SlotAction::Dismiss(id)))
        };
        html! {
            <div class={notice.severity.class()} key={id}>
                <i class={notice.severity.icon()}></i>
                <span>{ &notice.message }</span>
                <button class="notification-close" onclick={on_close}>
                    <i class="fas fa-times"></i>
                </button>
            </div>
        }
    });

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { props.children.clone() }
            { for banner }
        </ContextProvider<Notifier>>
    }
}
