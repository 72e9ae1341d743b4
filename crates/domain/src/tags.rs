//! Static tag catalogs offered for item and asset selection.
//!
//! Display data only; nothing in progression or derivation reads them.

use serde::Serialize;

/// One selectable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const fn tag(id: &'static str, label: &'static str, description: &'static str) -> TagDefinition {
    TagDefinition {
        id,
        label,
        description,
    }
}

pub const ITEM_TAGS: &[TagDefinition] = &[
    tag("concealable", "Concealable", "Easily hidden on your person."),
    tag("heavy", "Heavy", "Slows you down; hard to carry for long."),
    tag("loud", "Loud", "Using it draws attention."),
    tag("fragile", "Fragile", "Breaks if handled roughly."),
    tag("reach", "Reach", "Effective a few steps away."),
    tag("ranged", "Ranged", "Effective at a distance."),
    tag("thrown", "Thrown", "Can be thrown to use at range."),
    tag("reload", "Reload", "Must be reloaded after use."),
    tag("warded", "Warded", "Protects against soul strain."),
    tag("cursed", "Cursed", "Carries a price for whoever holds it."),
];

pub const ASSET_TAGS: &[TagDefinition] = &[
    tag("hideout", "Hideout", "A safe place the group can retreat to."),
    tag("contact", "Contact", "Someone who owes the group a favor."),
    tag("vehicle", "Vehicle", "Transport for the whole group."),
    tag("workshop", "Workshop", "Tools and space to build or repair."),
    tag("cache", "Cache", "Stashed supplies or coin."),
    tag("informant", "Informant", "Eyes and ears in a useful place."),
];

fn find(catalog: &'static [TagDefinition], id: &str) -> Option<&'static TagDefinition> {
    catalog.iter().find(|tag| tag.id.eq_ignore_ascii_case(id.trim()))
}

pub fn item_tag(id: &str) -> Option<&'static TagDefinition> {
    find(ITEM_TAGS, id)
}

pub fn asset_tag(id: &str) -> Option<&'static TagDefinition> {
    find(ASSET_TAGS, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tag_ids_are_unique_per_catalog() {
        for catalog in [ITEM_TAGS, ASSET_TAGS] {
            let ids: HashSet<_> = catalog.iter().map(|t| t.id).collect();
            assert_eq!(ids.len(), catalog.len());
        }
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(item_tag(" Heavy ").map(|t| t.label), Some("Heavy"));
        assert_eq!(asset_tag("hideout").map(|t| t.id), Some("hideout"));
        assert!(item_tag("hideout").is_none());
    }
}
