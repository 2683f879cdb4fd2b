use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::{AddedJson, ItemJson, ListJson, checkbox, short_id};
use crate::io::config_io;
use crate::io::store::Store;
use crate::model::entries::group_buckets;
use crate::model::item::Item;
use crate::ops::item_ops;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let mut store = open_store(cli.file.as_deref())?;

    match cli.command {
        None => unreachable!("main launches the TUI when no subcommand is given"),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&mut store, args, json),
            Commands::Add(args) => cmd_add(&mut store, args, json),
            Commands::Done(args) => cmd_done(&mut store, args),
            Commands::Rm(args) => cmd_rm(&mut store, args),
        },
    }
}

fn open_store(file_override: Option<&str>) -> Result<Store, Box<dyn std::error::Error>> {
    let config = config_io::load_config()?;
    let path = config_io::resolve_list_path(file_override, &config);
    config_io::ensure_parent(&path)?;
    Ok(Store::new(path))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn cmd_list(
    store: &mut Store,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = store.load()?;

    let filter = match &args.filter {
        Some(pattern) => Some(Regex::new(&format!("(?i){}", pattern))?),
        None => None,
    };
    let matches = |item: &Item| match &filter {
        Some(re) => {
            re.is_match(&item.text) || item.group.as_deref().is_some_and(|g| re.is_match(g))
        }
        None => true,
    };

    if json {
        let out = ListJson {
            items: items
                .iter()
                .filter(|i| (args.all || !i.done) && matches(i))
                .map(ItemJson::from)
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let filtered: Vec<Item> = items.into_iter().filter(|i| matches(i)).collect();
    for (group, members) in group_buckets(&filtered, !args.all) {
        if let Some(name) = &group {
            println!("{}:", name);
        }
        for item in members {
            let indent = if group.is_some() { "  " } else { "" };
            println!(
                "{}{} {}{}  ({})",
                indent,
                checkbox(item.done),
                item.priority.marker(),
                item.text,
                short_id(&item.id),
            );
        }
    }
    Ok(())
}

fn cmd_add(store: &mut Store, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.text.join(" ");
    let id = item_ops::create(store, &text)?;
    if json {
        println!("{}", serde_json::to_string(&AddedJson { id })?);
    } else {
        println!("added ({})", short_id(&id));
    }
    Ok(())
}

fn cmd_done(store: &mut Store, args: DoneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve_id(store, &args.id)?;
    let done = item_ops::toggle_done(store, &id)?;
    println!(
        "{} ({})",
        if done { "done" } else { "reopened" },
        short_id(&id)
    );
    Ok(())
}

fn cmd_rm(store: &mut Store, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve_id(store, &args.id)?;
    item_ops::delete(store, &id)?;
    println!("deleted ({})", short_id(&id));
    Ok(())
}

/// Resolve an id or unique id prefix against the current collection.
fn resolve_id(store: &mut Store, prefix: &str) -> Result<String, Box<dyn std::error::Error>> {
    let items = store.load()?;
    let matches: Vec<&Item> = items.iter().filter(|i| i.id.starts_with(prefix)).collect();
    match matches.as_slice() {
        [item] => Ok(item.id.clone()),
        [] => Err(format!("no item matches id '{}'", prefix).into()),
        _ => Err(format!("id '{}' is ambiguous ({} matches)", prefix, matches.len()).into()),
    }
}
