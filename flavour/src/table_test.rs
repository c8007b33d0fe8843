use crate::table::{Flavour, FlavourTable, TableError, DEFAULT_FLAVOURS};
use std::time::Duration;

fn flavour(name: &str, seconds: u64) -> Flavour {
    Flavour::new(name, Duration::from_secs(seconds))
}

#[test]
pub fn default_table_order() {
    assert_eq!(
        DEFAULT_FLAVOURS.names().collect::<Vec<_>>(),
        vec![
            "espresso",
            "microcentury",
            "longlunch",
            "workday",
            "tomorrow",
            "testmatch",
            "nextweek"
        ]
    );

    let ceilings: Vec<u64> = DEFAULT_FLAVOURS
        .iter()
        .map(|flavour| flavour.ceiling.as_secs())
        .collect();
    assert_eq!(
        ceilings,
        vec![1200, 3600, 7200, 28800, 86400, 259200, 604800]
    );
}

#[test]
pub fn default_table_is_valid() {
    let rebuilt = FlavourTable::new(DEFAULT_FLAVOURS.iter().cloned().collect());
    assert_eq!(rebuilt.as_ref(), Ok(&*DEFAULT_FLAVOURS));
}

#[test]
pub fn next_and_previous() {
    let table = &*DEFAULT_FLAVOURS;

    assert_eq!(table.next("espresso").unwrap().name, "microcentury");
    assert_eq!(table.next("testmatch").unwrap().name, "nextweek");
    assert!(table.next("nextweek").is_none());

    assert_eq!(table.previous("nextweek").unwrap().name, "testmatch");
    assert_eq!(table.previous("microcentury").unwrap().name, "espresso");
    assert!(table.previous("espresso").is_none());

    assert!(table.next("lunchbreak").is_none());
    assert!(table.previous("lunchbreak").is_none());
}

#[test]
pub fn classify_is_strict() {
    let table = &*DEFAULT_FLAVOURS;

    assert_eq!(table.classify(0), Some(0));
    assert_eq!(table.classify(1199), Some(0));
    assert_eq!(table.classify(1200), Some(1));
    assert_eq!(table.classify(7199), Some(2));
    assert_eq!(table.classify(7200), Some(3));
    assert_eq!(table.classify(604_799), Some(6));
    assert_eq!(table.classify(604_800), None);
    assert_eq!(table.classify(999_999_999), None);
}

#[test]
pub fn rejects_empty_table() {
    assert_eq!(FlavourTable::new(Vec::new()), Err(TableError::Empty));
}

#[test]
pub fn rejects_duplicate_names() {
    assert_eq!(
        FlavourTable::new(vec![flavour("short", 10), flavour("short", 20)]),
        Err(TableError::DuplicateName("short".to_string()))
    );
}

#[test]
pub fn rejects_unordered_ceilings() {
    assert_eq!(
        FlavourTable::new(vec![
            flavour("short", 10),
            flavour("long", 100),
            flavour("medium", 100)
        ]),
        Err(TableError::NotAscending {
            earlier: "long".to_string(),
            later: "medium".to_string()
        })
    );
}
