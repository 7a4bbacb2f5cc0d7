//! Plain-text rendering of view updates.

use chrono::TimeZone;
use huddle_app::Render;
use huddle_core::ConnectionState;

/// Lines to print for one view update. Times are shown as `HH:MM` in `tz`.
pub fn lines<Tz>(render: &Render, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match render {
        Render::LoginHint(hint) => vec![format!("! {hint}")],
        Render::ChatOpened { user } => vec![format!(
            "Joined as {}. Type a message and press Enter, /quit to leave.",
            user.name
        )],
        Render::Roster(view) => {
            let mut lines = vec!["Online:".to_owned()];
            lines.extend(view.labels().into_iter().map(|label| format!("  - {label}")));
            let updated = view.updated_at().with_timezone(tz).format("%H:%M");
            lines.push(format!("Updated: {updated}"));
            lines
        },
        Render::Message { message, direction } => vec![format!(
            "[{}] {}: {}",
            message.time_label_in(tz),
            message.header_for(*direction),
            message.text
        )],
        Render::Status(state) => vec![format!("* {}", status_label(*state))],
    }
}

fn status_label(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Disconnected => "offline",
        ConnectionState::Connecting => "connecting",
        ConnectionState::Open => "connected",
        ConnectionState::Closing => "leaving",
        ConnectionState::Errored => "connection lost",
        ConnectionState::Closed => "disconnected",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use huddle_core::{Direction, Message, PresenceReconciler};
    use huddle_proto::{ChatMessage, User};

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap()
    }

    fn alice() -> User {
        User::new(1, "alice")
    }

    fn text(render: &Render) -> String {
        lines(render, &Utc).join("\n")
    }

    #[test]
    fn roster_lists_local_user_first() {
        let mut roster = PresenceReconciler::new();
        let view = roster
            .apply(vec![User::new(2, "bob"), alice()], Some(&alice()), at())
            .clone();

        insta::assert_snapshot!(text(&Render::Roster(view)), @r"
        Online:
          - You (alice)
          - bob
        Updated: 09:05
        ");
    }

    #[test]
    fn empty_roster() {
        let mut roster = PresenceReconciler::new();
        let view = roster.apply(vec![], Some(&alice()), at()).clone();

        insta::assert_snapshot!(text(&Render::Roster(view)), @r"
        Online:
          - No one else online
        Updated: 09:05
        ");
    }

    #[test]
    fn own_message_is_headed_you() {
        let chat = ChatMessage { message: "hello".into(), user: alice() };
        let message = Message::from_chat(chat, at());
        let render = Render::Message { message, direction: Direction::Own };

        insta::assert_snapshot!(text(&render), @"[09:05] You: hello");
    }

    #[test]
    fn header_follows_direction() {
        let chat = ChatMessage { message: "hi".into(), user: alice() };
        let message = Message::from_chat(chat, at());
        let render = Render::Message { message, direction: Direction::Other };

        insta::assert_snapshot!(text(&render), @"[09:05] alice: hi");
    }

    #[test]
    fn other_message_is_headed_with_nickname() {
        let chat = ChatMessage { message: "hey".into(), user: User::new(2, "bob") };
        let message = Message::from_chat(chat, at());
        let render = Render::Message { message, direction: Direction::Other };

        insta::assert_snapshot!(text(&render), @"[09:05] bob: hey");
    }

    #[test]
    fn hint_and_status() {
        let hint = Render::LoginHint("Nickname cannot be empty".into());
        assert_eq!(text(&hint), "! Nickname cannot be empty");
        assert_eq!(text(&Render::Status(ConnectionState::Errored)), "* connection lost");
    }
}
