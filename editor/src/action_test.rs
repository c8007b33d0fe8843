use crate::{
    action::{change_flavour, change_flavours, Action, ChangeError, Outcome},
    submission::SUBMIT_FILE_NAME,
};
use condor_flavour::{Flavour, FlavourTable, DEFAULT_FLAVOURS};
use std::{fs, path::Path, path::PathBuf, time::Duration};

fn submit_with(flavour: &str) -> String {
    format!("executable = run.sh\n+JobFlavour = \"{flavour}\"\nqueue\n")
}

fn sample_at(flavour: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(SUBMIT_FILE_NAME), submit_with(flavour)).unwrap();
    dir
}

fn stored(sample: &Path) -> String {
    fs::read_to_string(sample.join(SUBMIT_FILE_NAME)).unwrap()
}

#[test]
pub fn increase_steps_up() {
    let names: Vec<&str> = DEFAULT_FLAVOURS.names().collect();

    for pair in names.windows(2) {
        let sample = sample_at(pair[0]);
        let outcome = change_flavour(sample.path(), Action::Increase, None, &DEFAULT_FLAVOURS);

        assert_eq!(
            outcome.unwrap(),
            Outcome::Changed {
                from: pair[0].to_string(),
                to: pair[1].to_string()
            }
        );
        assert_eq!(stored(sample.path()), submit_with(pair[1]));
    }
}

#[test]
pub fn increase_at_highest_fails() {
    let sample = sample_at("nextweek");

    assert!(matches!(
        change_flavour(sample.path(), Action::Increase, None, &DEFAULT_FLAVOURS),
        Err(ChangeError::AtHighest { flavour, .. }) if flavour == "nextweek"
    ));
    assert_eq!(stored(sample.path()), submit_with("nextweek"));
}

#[test]
pub fn decrease_steps_down() {
    let names: Vec<&str> = DEFAULT_FLAVOURS.names().collect();

    for pair in names.windows(2) {
        let sample = sample_at(pair[1]);
        change_flavour(sample.path(), Action::Decrease, None, &DEFAULT_FLAVOURS).unwrap();

        assert_eq!(stored(sample.path()), submit_with(pair[0]));
    }
}

#[test]
pub fn decrease_at_lowest_fails() {
    let sample = sample_at("espresso");

    assert!(matches!(
        change_flavour(sample.path(), Action::Decrease, None, &DEFAULT_FLAVOURS),
        Err(ChangeError::AtLowest { flavour, .. }) if flavour == "espresso"
    ));
    assert_eq!(stored(sample.path()), submit_with("espresso"));
}

#[test]
pub fn set_any_known_flavour() {
    for from in DEFAULT_FLAVOURS.names() {
        for to in DEFAULT_FLAVOURS.names() {
            let sample = sample_at(from);
            change_flavour(sample.path(), Action::Set, Some(to), &DEFAULT_FLAVOURS).unwrap();

            assert_eq!(stored(sample.path()), submit_with(to));
            assert_eq!(
                change_flavour(sample.path(), Action::Show, None, &DEFAULT_FLAVOURS).unwrap(),
                Outcome::Shown(to.to_string())
            );
        }
    }
}

#[test]
pub fn set_without_target() {
    let sample = sample_at("workday");

    assert!(matches!(
        change_flavour(sample.path(), Action::Set, None, &DEFAULT_FLAVOURS),
        Err(ChangeError::MissingTarget)
    ));
    assert_eq!(stored(sample.path()), submit_with("workday"));
}

#[test]
pub fn show_does_not_write() {
    let sample = sample_at("longlunch");

    assert_eq!(
        change_flavour(sample.path(), Action::Show, Some("nextweek"), &DEFAULT_FLAVOURS).unwrap(),
        Outcome::Shown("longlunch".to_string())
    );
    assert_eq!(stored(sample.path()), submit_with("longlunch"));
}

#[test]
pub fn unknown_current_flavour() {
    let sample = sample_at("lunchbreak");

    assert!(matches!(
        change_flavour(sample.path(), Action::Increase, None, &DEFAULT_FLAVOURS),
        Err(ChangeError::UnknownFlavour { .. })
    ));
    assert_eq!(stored(sample.path()), submit_with("lunchbreak"));
}

#[test]
pub fn custom_table() {
    let table = FlavourTable::new(vec![
        Flavour::new("short", Duration::from_secs(60)),
        Flavour::new("long", Duration::from_secs(600)),
    ])
    .unwrap();
    let sample = sample_at("short");

    change_flavour(sample.path(), Action::Increase, None, &table).unwrap();
    assert_eq!(stored(sample.path()), submit_with("long"));
    assert!(change_flavour(sample.path(), Action::Increase, None, &table).is_err());
}

#[test]
pub fn missing_submit_file() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        change_flavour(dir.path(), Action::Show, None, &DEFAULT_FLAVOURS),
        Err(ChangeError::Submit(_))
    ));
}

#[test]
pub fn failing_samples_do_not_stop_the_rest() {
    let first = sample_at("espresso");
    let without_submit = tempfile::tempdir().unwrap();
    let highest = sample_at("nextweek");
    let last = sample_at("workday");
    let samples: Vec<PathBuf> = [&first, &without_submit, &highest, &last]
        .iter()
        .map(|dir| dir.path().to_path_buf())
        .collect();

    assert!(!change_flavours(&samples, Action::Increase, None, &DEFAULT_FLAVOURS));

    assert_eq!(stored(first.path()), submit_with("microcentury"));
    assert!(!without_submit.path().join(SUBMIT_FILE_NAME).exists());
    assert_eq!(stored(highest.path()), submit_with("nextweek"));
    assert_eq!(stored(last.path()), submit_with("tomorrow"));
}

#[test]
pub fn all_samples_succeed() {
    let samples_dirs = [sample_at("espresso"), sample_at("longlunch")];
    let samples: Vec<PathBuf> = samples_dirs
        .iter()
        .map(|dir| dir.path().to_path_buf())
        .collect();

    assert!(change_flavours(&samples, Action::Set, Some("testmatch"), &DEFAULT_FLAVOURS));
    for dir in samples_dirs.iter() {
        assert_eq!(stored(dir.path()), submit_with("testmatch"));
    }
    assert!(change_flavours(&samples, Action::Show, None, &DEFAULT_FLAVOURS));
}
