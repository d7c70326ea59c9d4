//! Static gift sticker catalog
//!
//! Five stickers keyed by small integer strings ("1".."5"). The table is a
//! `static` array, so lookups never allocate and the catalog cannot change
//! at runtime.

use serde::Serialize;
use uuid::Uuid;

/// A gift sticker that can be attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: Uuid,
    pub name: &'static str,
    pub desc: Option<&'static str>,
    #[serde(rename = "imgURL")]
    pub img_url: &'static str,
    pub bg_color_code: &'static str,
    pub border_color: &'static str,
    pub order: u32,
}

/// Catalog entry: the key stored on posts plus the gift it resolves to
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub gift: &'static Gift,
}

static CATALOG: [(&str, Gift); 5] = [
    (
        "1",
        Gift {
            id: Uuid::from_u128(0xba8a1955_5f71_4cde_9886_62fc829784a1),
            name: "cocoa",
            desc: None,
            img_url: "/img/Sticker/Cocoa.png",
            bg_color_code: "white",
            border_color: "#B44137",
            order: 1,
        },
    ),
    (
        "2",
        Gift {
            id: Uuid::from_u128(0x04fc6ec8_abc6_4328_9dce_66aaf8516c64),
            name: "momiji",
            desc: None,
            img_url: "/img/Sticker/Manju.png",
            bg_color_code: "white",
            border_color: "#AA613F",
            order: 2,
        },
    ),
    (
        "3",
        Gift {
            id: Uuid::from_u128(0x32671e3c_59fb_4972_8926_18f5751efe16),
            name: "star",
            desc: None,
            img_url: "/img/Sticker/Star.png",
            bg_color_code: "white",
            border_color: "#CFBB41",
            order: 3,
        },
    ),
    (
        "4",
        Gift {
            id: Uuid::from_u128(0x46fd5699_ccb1_4882_b5ad_469b8491747a),
            name: "pork",
            desc: None,
            img_url: "/img/Sticker/Grilled pork.png",
            bg_color_code: "white",
            border_color: "#2A5421",
            order: 4,
        },
    ),
    (
        "5",
        Gift {
            id: Uuid::from_u128(0x6916f01c_2287_4637_aa57_65b7886dc368),
            name: "cpu",
            desc: None,
            img_url: "/img/Sticker/PC RGB.png",
            bg_color_code: "white",
            border_color: "#5A7397",
            order: 5,
        },
    ),
];

/// Resolve a gift key ("1".."5") to its catalog entry.
pub fn lookup(key: &str) -> Option<&'static Gift> {
    CATALOG.iter().find(|(k, _)| *k == key).map(|(_, gift)| gift)
}

/// Whether `key` names a gift in the catalog.
pub fn contains(key: &str) -> bool {
    lookup(key).is_some()
}

/// All catalog entries in display order.
pub fn catalog() -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = CATALOG
        .iter()
        .map(|(key, gift)| CatalogEntry { key: *key, gift })
        .collect();
    entries.sort_by_key(|e| e.gift.order);
    entries
}
