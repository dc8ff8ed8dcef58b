//! Integration tests for the root state container.

use std::cell::RefCell;
use std::rc::Rc;

use hub_store::{Change, ModuleName, Mutation, Store, StoreError};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn initial_state() {
    let store = Store::standard().unwrap();
    assert_eq!(store.project_id(), "");
    assert_eq!(store.previous_url(), "");
    assert_eq!(store.minimum_project_points(), 100);
    assert_eq!(store.minimum_subject_points(), 100);
}

#[test]
fn navigation_scenario() {
    let mut store = Store::standard().unwrap();
    assert_eq!(store.project_id(), "");

    store.set_previous_url("/home");
    assert_eq!(store.previous_url(), "/home");

    store.set_current_project_id("proj-42");
    assert_eq!(store.project_id(), "proj-42");
    assert_eq!(store.minimum_subject_points(), 100);

    let rendered = serde_json::to_string_pretty(store.state()).unwrap();
    insta::assert_snapshot!(rendered, @r#"
    {
      "projectId": "proj-42",
      "previousUrl": "/home",
      "minimumProjectPoints": 100,
      "minimumSubjectPoints": 100
    }
    "#);
}

#[test]
fn last_write_wins() {
    let mut store = Store::standard().unwrap();
    store.set_current_project_id("A");
    store.set_current_project_id("B");
    assert_eq!(store.project_id(), "B");
}

#[test]
fn malformed_values_are_stored_as_is() {
    let mut store = Store::standard().unwrap();
    store.set_previous_url("not a url ::: %%");
    assert_eq!(store.previous_url(), "not a url ::: %%");

    store.set_current_project_id("proj-1");
    store.set_current_project_id("");
    assert!(store.state().project_id().is_empty());
}

#[test]
fn same_value_commit_still_notifies() {
    let mut store = Store::standard().unwrap();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    store.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));

    store.set_previous_url("/home");
    store.set_previous_url("/home");

    let changes = changes.borrow();
    assert_eq!(changes.len(), 2);
    assert_eq!(
        changes[1],
        Change::Root {
            mutation: Mutation::PreviousUrl("/home".into()),
            previous: "/home".into(),
        }
    );
}

#[test]
fn observers_run_in_subscription_order() {
    let mut store = Store::standard().unwrap();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let sink = Rc::clone(&order);
        store.subscribe(move |_, _| sink.borrow_mut().push(tag));
    }

    store.set_current_project_id("p");
    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn module_commits_leave_root_fields_alone() {
    let mut store = Store::standard().unwrap();
    store.set_current_project_id("proj-7");

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    store.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));

    store
        .commit_module(
            ModuleName::Auth.as_str(),
            "set",
            json!({"key": "user", "value": {"id": 3}}),
        )
        .unwrap();

    assert_eq!(store.project_id(), "proj-7");
    assert_eq!(store.previous_url(), "");
    assert_eq!(store.minimum_project_points(), 100);

    let snapshot = store.snapshot();
    assert_eq!(snapshot["auth"]["user"]["id"], json!(3));
    assert_eq!(snapshot["users"], json!({}));
    assert_eq!(snapshot["projectId"], json!("proj-7"));

    assert_eq!(
        *changes.borrow(),
        vec![Change::Module {
            namespace: "auth".into(),
            operation: "set".into(),
        }]
    );
}

#[test]
fn commit_parsed_assignments_in_order() {
    let mut store = Store::standard().unwrap();
    for raw in ["previousUrl=/home", "currentProjectId=proj-42", "previousUrl=/projects/proj-42"] {
        store.commit(raw.parse().unwrap());
    }
    assert_eq!(store.previous_url(), "/projects/proj-42");
    assert_eq!(store.project_id(), "proj-42");
    assert_eq!(store.version(), 3);
}

#[test]
fn thresholds_have_no_mutation() {
    let err = "minimumSubjectPoints=5".parse::<Mutation>().unwrap_err();
    assert!(matches!(err, StoreError::UnknownMutation(_)));
}

#[test]
fn snapshot_contains_every_namespace() {
    let store = Store::standard().unwrap();
    let snapshot = store.snapshot();
    for name in ModuleName::all() {
        assert!(snapshot.get(name.as_str()).is_some(), "missing {name}");
    }
    assert_eq!(snapshot["minimumSubjectPoints"], json!(100));
}

#[test]
fn snapshot_lists_root_fields_then_modules_in_registration_order() {
    let store = Store::standard().unwrap();
    let snapshot = store.snapshot();
    let keys: Vec<&str> = snapshot
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "projectId",
            "previousUrl",
            "minimumProjectPoints",
            "minimumSubjectPoints",
            "auth",
            "users",
            "subjects",
            "projects",
            "badges",
            "config",
            "libVersion",
        ]
    );
}

proptest! {
    #[test]
    fn project_id_reads_back_what_was_written(s in any::<String>()) {
        let mut store = Store::standard().unwrap();
        store.set_current_project_id(s.clone());
        prop_assert_eq!(store.project_id(), s.as_str());
    }

    #[test]
    fn previous_url_reads_back_what_was_written(s in any::<String>()) {
        let mut store = Store::standard().unwrap();
        store.set_previous_url(s.clone());
        prop_assert_eq!(store.previous_url(), s.as_str());
    }

    #[test]
    fn thresholds_survive_any_root_mutations(
        writes in proptest::collection::vec((any::<bool>(), any::<String>()), 0..32)
    ) {
        let mut store = Store::standard().unwrap();
        for (is_project, value) in writes {
            if is_project {
                store.set_current_project_id(value);
            } else {
                store.set_previous_url(value);
            }
        }
        prop_assert_eq!(store.minimum_project_points(), 100);
        prop_assert_eq!(store.minimum_subject_points(), 100);
    }
}
