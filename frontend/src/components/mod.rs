mod admin_card;
mod notifications;
mod pagination;
mod record_table;

pub use admin_card::AdminCard;
pub use notifications::NotificationHost;
pub use pagination::Pagination;
pub use record_table::{LogRow, NameRow, ReputationRow};

use shared::view::{AdminCardView, LogRowView, NameRowView, ReputationRowView};
use shared::{AdminRecord, LogRecord, NameChangeRecord, PanelConfig, PanelRecord, ReputationRecord};
use yew::prelude::*;

/// How a record type lays itself out on its page.
pub trait RecordView: PanelRecord {
    /// Wrap rendered records (or a placeholder) in the page's container.
    fn frame(body: Html) -> Html;

    /// A loading, empty or error message sized to the container.
    fn placeholder(class: &'static str, text: &str) -> Html;

    fn render(records: &[Self], config: &PanelConfig) -> Html;
}

/// Names may repeat or be blank, so the position keeps sibling keys unique.
fn card_key(idx: usize, name: &str) -> String {
    format!("{}:{}", idx, name)
}

fn table(headers: &'static [&'static str], body: Html) -> Html {
    html! {
        <div class="table-container">
            <table class="gaming-table">
                <thead>
                    <tr>
                        { for headers.iter().map(|h| html! { <th>{ *h }</th> }) }
                    </tr>
                </thead>
                <tbody>{ body }</tbody>
            </table>
        </div>
    }
}

fn table_placeholder(columns: usize, class: &'static str, text: &str) -> Html {
    html! {
        <tr>
            <td colspan={columns.to_string()} class={class}>{ text }</td>
        </tr>
    }
}

impl RecordView for AdminRecord {
    fn frame(body: Html) -> Html {
        html! { <div class="admin-grid">{ body }</div> }
    }

    fn placeholder(class: &'static str, text: &str) -> Html {
        html! { <div class={class}>{ text }</div> }
    }

    fn render(records: &[Self], config: &PanelConfig) -> Html {
        records
            .iter()
            .enumerate()
            .map(|(idx, admin)| {
                let card = AdminCardView::new(admin, &config.detail_page);
                html! { <AdminCard key={card_key(idx, &admin.name)} card={card} /> }
            })
            .collect()
    }
}

impl RecordView for LogRecord {
    fn frame(body: Html) -> Html {
        table(record_table::LOG_HEADERS, body)
    }

    fn placeholder(class: &'static str, text: &str) -> Html {
        table_placeholder(Self::ENTITY.column_count(), class, text)
    }

    fn render(records: &[Self], _config: &PanelConfig) -> Html {
        records
            .iter()
            .map(|log| html! { <LogRow row={LogRowView::from(log)} /> })
            .collect()
    }
}

impl RecordView for ReputationRecord {
    fn frame(body: Html) -> Html {
        table(record_table::REPUTATION_HEADERS, body)
    }

    fn placeholder(class: &'static str, text: &str) -> Html {
        table_placeholder(Self::ENTITY.column_count(), class, text)
    }

    fn render(records: &[Self], _config: &PanelConfig) -> Html {
        records
            .iter()
            .map(|rep| html! { <ReputationRow row={ReputationRowView::from(rep)} /> })
            .collect()
    }
}

impl RecordView for NameChangeRecord {
    fn frame(body: Html) -> Html {
        table(record_table::NAME_HEADERS, body)
    }

    fn placeholder(class: &'static str, text: &str) -> Html {
        table_placeholder(Self::ENTITY.column_count(), class, text)
    }

    fn render(records: &[Self], _config: &PanelConfig) -> Html {
        records
            .iter()
            .map(|change| html! { <NameRow row={NameRowView::from(change)} /> })
            .collect()
    }
}
