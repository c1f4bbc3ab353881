use shared::view::AdminCardView;
use yew::prelude::*;

const WARNINGS_LABEL: &str = "Предупреждения";
const CONFIRMED_LABEL: &str = "Подтвержден";
const SUPPORT_LABEL: &str = "Support";
const ONLINE_LABEL: &str = "Онлайн";

#[derive(Properties, PartialEq)]
pub struct AdminCardProps {
    pub card: AdminCardView,
}

/// One moderator in the roster grid. The whole card links to the detail
/// page in a new tab.
#[function_component(AdminCard)]
pub fn admin_card(props: &AdminCardProps) -> Html {
    let card = &props.card;

    html! {
        <a href={card.detail_href.clone()} target="_blank" class="admin-card-link">
            <div class="admin-card">
                <div class="admin-header">
                    <div class="admin-avatar">{ &card.avatar }</div>
                    <div class="admin-info">
                        <h3>{ &card.name }</h3>
                        <span class="admin-level">{ &card.level_label }</span>
                    </div>
                </div>
                <div class="admin-stats">
                    <div class="stat">
                        <span class="stat-label">{ WARNINGS_LABEL }</span>
                        <span class="stat-value">{ &card.warnings }</span>
                    </div>
                    <div class="stat">
                        <span class="stat-label">{ CONFIRMED_LABEL }</span>
                        <span class={classes!("stat-value", card.confirmed.class)}>
                            { card.confirmed.label }
                        </span>
                    </div>
                    <div class="stat">
                        <span class="stat-label">{ SUPPORT_LABEL }</span>
                        <span class={classes!("stat-value", card.support.class)}>
                            { card.support.label }
                        </span>
                    </div>
                    <div class="stat">
                        <span class="stat-label">{ ONLINE_LABEL }</span>
                        <span class="stat-value status-offline">{ card.online_label }</span>
                    </div>
                </div>
                <div class="admin-details">
                    <div class="detail-row">
                        <i class="fas fa-calendar"></i>
                        <span>{ "Дата назначения: " }{ &card.appointed_at }</span>
                    </div>
                    <div class="detail-row">
                        <i class="fas fa-user-shield"></i>
                        <span>{ "Назначил: " }{ &card.appointed_by }</span>
                    </div>
                    <div class="detail-row">
                        <i class="fas fa-network-wired"></i>
                        <span>{ "IP адрес: " }{ &card.ip }</span>
                    </div>
                </div>
            </div>
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_labels_match_the_site() {
        assert_eq!(
            [WARNINGS_LABEL, CONFIRMED_LABEL, SUPPORT_LABEL, ONLINE_LABEL],
            ["Предупреждения", "Подтвержден", "Support", "Онлайн"]
        );
    }
}
