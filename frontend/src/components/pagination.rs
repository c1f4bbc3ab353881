use shared::Pager;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub pager: Pager,
    /// Disable both buttons while a load is running
    #[prop_or_default]
    pub busy: bool,
    pub on_page: Callback<u32>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let pager = props.pager;

    let on_prev = {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = pager.previous() {
                on_page.emit(page);
            }
        })
    };
    let on_next = {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = pager.next() {
                on_page.emit(page);
            }
        })
    };

    html! {
        <div class="pagination">
            <button
                class="gaming-btn"
                disabled={props.busy || pager.prev_disabled()}
                onclick={on_prev}
            >
                <i class="fas fa-chevron-left"></i>{ " Предыдущая" }
            </button>
            <span class="page-info">{ pager.label() }</span>
            <button
                class="gaming-btn"
                disabled={props.busy || pager.next_disabled()}
                onclick={on_next}
            >
                { "Следующая " }<i class="fas fa-chevron-right"></i>
            </button>
        </div>
    }
}
