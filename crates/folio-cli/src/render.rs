//! Plain-text rendering of the dashboard for the terminal.

use folio_analytics::DashboardState;
use folio_core::{stat_cards, IdentityBadge, StatCard};

pub(crate) fn print_dashboard(state: &DashboardState) {
    for card in stat_cards(&state.analytics) {
        println!("{}", card_line(&card));
    }

    let recent = &state.analytics.recent_projects;
    if !recent.is_empty() {
        println!("Recent projects:");
        for project in recent {
            println!("  - {}", project.name);
        }
    }
    println!("Published posts loaded: {}", state.published_posts.len());
    println!();
}

pub(crate) fn print_identity(badge: &IdentityBadge) {
    println!("{}", identity_line(badge));
}

fn card_line(card: &StatCard) -> String {
    match &card.change {
        Some(change) => format!("{:<16} {:>12}  ({change})", card.title, card.value),
        None => format!("{:<16} {:>12}", card.title, card.value),
    }
}

fn identity_line(badge: &IdentityBadge) -> String {
    let mut line = format!("[{}] {}", badge.initial, badge.display_name);
    if let Some(handle) = &badge.handle {
        line.push(' ');
        line.push_str(handle);
    }
    if let Some(avatar) = &badge.avatar {
        line.push_str(&format!(" <{avatar}>"));
    }
    line
}
