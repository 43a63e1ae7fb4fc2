use uuid::Uuid;

/// Records carrying a store-assigned id.
pub trait Identifiable {
    fn id(&self) -> Uuid;

    /// First eight hex digits, enough to tell entries apart in listings.
    fn short_id(&self) -> String {
        let mut text = self.id().simple().to_string();
        text.truncate(8);
        text
    }

    /// True when the hyphenated id starts with `prefix` (case-insensitive).
    fn id_starts_with(&self, prefix: &str) -> bool {
        !prefix.is_empty()
            && self
                .id()
                .hyphenated()
                .to_string()
                .starts_with(&prefix.to_ascii_lowercase())
    }
}

pub trait NamedEntity {
    fn name(&self) -> &str;

    fn name_matches(&self, needle: &str) -> bool {
        self.name().eq_ignore_ascii_case(needle.trim())
    }
}

pub trait BelongsToCategory {
    fn category_id(&self) -> Option<Uuid>;
}

/// Amount charged per occurrence.
pub trait Amounted {
    fn amount(&self) -> f64;
}

pub trait Displayable {
    fn display_label(&self) -> String;
}
