use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hub_cli::output::{
    changes_table, commit_report, module_state_table, modules_table, state_table,
};
use hub_store::{Store, StoreSettings, load_or_default, load_settings};

use crate::cli::{CommitArgs, OutputFormatArg, StateArgs};

pub fn run_state(args: &StateArgs) -> Result<()> {
    let store = build_store(args)?;
    match args.format {
        OutputFormatArg::Table => {
            println!("{}", state_table(store.state()));
            println!("{}", module_state_table(store.modules()));
        }
        OutputFormatArg::Json => println!("{}", serde_json::to_string_pretty(&store.snapshot())?),
    }
    Ok(())
}

pub fn run_commit(args: &CommitArgs) -> Result<()> {
    let mut store = build_store(&args.state)?;
    let span = info_span!("commit", count = args.mutations.len());
    let _guard = span.enter();

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let subscription = store.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));

    for mutation in &args.mutations {
        store.commit(mutation.clone());
    }
    store.unsubscribe(subscription);
    info!(version = store.version(), "mutations applied");

    let changes = changes.borrow();
    match args.state.format {
        OutputFormatArg::Table => {
            println!("{}", changes_table(&changes));
            println!("{}", state_table(store.state()));
            println!("{}", module_state_table(store.modules()));
        }
        OutputFormatArg::Json => {
            let report = commit_report(&changes, &store);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

pub fn run_modules() -> Result<()> {
    let store = Store::standard().context("compose standard store")?;
    println!("{}", modules_table(store.modules()));
    Ok(())
}

fn build_store(args: &StateArgs) -> Result<Store> {
    let settings: StoreSettings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("load settings from {}", path.display()))?,
        None => load_or_default(),
    };
    Store::builder()
        .settings(settings)
        .build_standard()
        .context("compose standard store")
}
