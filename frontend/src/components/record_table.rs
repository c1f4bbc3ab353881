//! Table rows for the paged listings

use shared::view::{LogRowView, NameRowView, ReputationRowView};
use yew::prelude::*;

pub const LOG_HEADERS: &[&str] = &[
    "Администратор",
    "Игрок",
    "Команда",
    "Причина",
    "Количество",
    "Дата",
];

pub const REPUTATION_HEADERS: &[&str] = &[
    "От кого",
    "Кому",
    "Репутация",
    "Комментарий",
    "Заблокировано",
    "Дата",
];

pub const NAME_HEADERS: &[&str] = &[
    "ID аккаунта",
    "Старый ник",
    "Новый ник",
    "Администратор",
    "Дата",
];

#[derive(Properties, PartialEq)]
pub struct LogRowProps {
    pub row: LogRowView,
}

#[function_component(LogRow)]
pub fn log_row(props: &LogRowProps) -> Html {
    let row = &props.row;
    html! {
        <tr>
            <td>{ &row.admin }</td>
            <td>{ &row.player }</td>
            <td><code>{ &row.command }</code></td>
            <td>{ &row.reason }</td>
            <td>{ &row.amount }</td>
            <td>{ &row.date }</td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct ReputationRowProps {
    pub row: ReputationRowView,
}

#[function_component(ReputationRow)]
pub fn reputation_row(props: &ReputationRowProps) -> Html {
    let row = &props.row;
    html! {
        <tr>
            <td>{ &row.from }</td>
            <td>{ &row.to }</td>
            <td><span class={row.badge.class}>{ &row.badge.text }</span></td>
            <td>{ &row.comment }</td>
            <td><span class={row.blocked_class}>{ &row.blocked_label }</span></td>
            <td>{ &row.date }</td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct NameRowProps {
    pub row: NameRowView,
}

#[function_component(NameRow)]
pub fn name_row(props: &NameRowProps) -> Html {
    let row = &props.row;
    html! {
        <tr>
            <td>{ &row.account_id }</td>
            <td>{ &row.previous }</td>
            <td>{ &row.current }</td>
            <td>{ &row.admin }</td>
            <td>{ &row.date }</td>
        </tr>
    }
}
