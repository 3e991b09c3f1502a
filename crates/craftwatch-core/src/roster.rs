//! Roster renderer: player identifiers to roster items.

use serde::Serialize;

use crate::error::CoreError;

/// Text of the single item shown when nobody is online.
pub const EMPTY_ROSTER_TEXT: &str = "No players online";

/// Placeholder substituted with the player identifier in avatar templates.
pub const PLAYER_PLACEHOLDER: &str = "{player}";

/// Default avatar service: 32px head renders keyed by player name.
pub const DEFAULT_AVATAR_TEMPLATE: &str = "https://mc-heads.net/avatar/{player}/32";

/// One rendered roster element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RosterItem {
    /// Empty-state text; the only item when the roster is empty.
    Placeholder(String),
    /// An online player with their avatar image URL.
    Player { name: String, avatar_url: String },
}

/// Avatar image URL template containing [`PLAYER_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarTemplate(String);

impl AvatarTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, CoreError> {
        let template = template.into();
        if !template.contains(PLAYER_PLACEHOLDER) {
            return Err(CoreError::AvatarTemplate { template });
        }
        Ok(Self(template))
    }

    /// Avatar URL for `player`, with the identifier percent-encoded as a
    /// single path segment.
    pub fn url_for(&self, player: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(player.as_bytes()).collect();
        // form encoding spells spaces as `+`, which a path would keep literally
        self.0.replace(PLAYER_PLACEHOLDER, &encoded.replace('+', "%20"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AvatarTemplate {
    fn default() -> Self {
        Self(DEFAULT_AVATAR_TEMPLATE.to_owned())
    }
}

/// Builds the roster list. Every call produces the complete list; nothing
/// from a previous render survives.
#[derive(Debug, Clone, Default)]
pub struct RosterRenderer {
    avatars: AvatarTemplate,
}

impl RosterRenderer {
    pub fn new(avatars: AvatarTemplate) -> Self {
        Self { avatars }
    }

    pub fn render(&self, players: &[String]) -> Vec<RosterItem> {
        if players.is_empty() {
            return vec![RosterItem::Placeholder(EMPTY_ROSTER_TEXT.to_owned())];
        }
        players
            .iter()
            .map(|name| RosterItem::Player {
                name: name.clone(),
                avatar_url: self.avatars.url_for(name),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(items: &[RosterItem]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|item| match item {
                RosterItem::Player { name, .. } => Some(name.as_str()),
                RosterItem::Placeholder(_) => None,
            })
            .collect()
    }

    #[test]
    fn empty_roster_renders_single_placeholder() {
        let items = RosterRenderer::default().render(&[]);
        assert_eq!(
            items,
            vec![RosterItem::Placeholder("No players online".into())]
        );
        assert!(names(&items).is_empty());
    }

    #[test]
    fn players_render_in_input_order() {
        let players: Vec<String> = ["Steve", "Alex", "Notch"].map(String::from).to_vec();
        let items = RosterRenderer::default().render(&players);

        assert_eq!(items.len(), 3);
        assert_eq!(names(&items), vec!["Steve", "Alex", "Notch"]);
        for (item, player) in items.iter().zip(&players) {
            let RosterItem::Player { avatar_url, .. } = item else {
                panic!("expected player item, got {item:?}");
            };
            assert!(avatar_url.contains(player.as_str()), "{avatar_url}");
        }
    }

    #[test]
    fn default_template_url() {
        assert_eq!(
            AvatarTemplate::default().url_for("Steve"),
            "https://mc-heads.net/avatar/Steve/32"
        );
    }

    #[test]
    fn identifiers_are_encoded_as_one_segment() {
        let template = AvatarTemplate::default();
        assert_eq!(
            template.url_for("a b/c"),
            "https://mc-heads.net/avatar/a%20b%2Fc/32"
        );
        assert_eq!(
            template.url_for("under_score"),
            "https://mc-heads.net/avatar/under_score/32"
        );
    }

    #[test]
    fn custom_template_requires_placeholder() {
        assert!(AvatarTemplate::new("https://crafatar.com/avatars/{player}").is_ok());
        assert!(matches!(
            AvatarTemplate::new("https://example.org/avatar.png"),
            Err(CoreError::AvatarTemplate { .. })
        ));
    }

    #[test]
    fn rerender_replaces_previous_roster() {
        let renderer = RosterRenderer::default();
        let first = renderer.render(&["Steve".into(), "Alex".into()]);
        let second = renderer.render(&["Alex".into()]);
        assert_eq!(first.len(), 2);
        assert_eq!(names(&second), vec!["Alex"]);
    }
}
