use super::print::{
    print_categories, print_full_snippets, print_message, print_plain_snippets, print_snippets,
    print_tags,
};
use super::setup::AppContext;
use crate::args::{CategoryAction, TagAction, ToggleFlag};
use snipz::commands::export::ExportFormat;
use snipz::commands::search::SearchFilter;
use snipz::commands::{CmdMessage, CmdResult};
use snipz::config::KEYS;
use snipz::error::{Result, SnipzError};
use snipz::index::{indexed, parse_selector_or_range, parse_selectors, resolve_selectors, Selector};
use snipz::mask::mask_sensitive_data;
use snipz::model::{Snippet, SnippetPatch};
use snipz::password::{generate, PasswordOptions};
use std::io::Read;
use std::path::PathBuf;

/// Prints a successful result's message, or turns a failed one into an error for `main`.
fn finish<T>(result: CmdResult<T>) -> Result<T> {
    if result.is_success() {
        print_message(&result.message);
    }
    quietly(result)
}

/// Like [`finish`], without printing the success message.
fn quietly<T>(result: CmdResult<T>) -> Result<T> {
    if result.is_success() {
        Ok(result.value)
    } else {
        Err(SnipzError::Api(result.message.content))
    }
}

pub fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    category: Option<String>,
    tag: Option<String>,
) -> Result<()> {
    let filter = SearchFilter {
        query: search,
        category,
        tag,
    };
    let result = ctx.api.search(&filter);
    let message = result.message.clone();
    let matches = quietly(result)?;
    let categories = ctx.api.categories().value;
    print_snippets(&matches, &categories, ctx.config.mask_sensitive);
    print_message(&message);
    Ok(())
}

pub fn handle_show(ctx: &mut AppContext, selectors: Vec<String>, reveal: bool) -> Result<()> {
    let selectors = parse_selectors(&selectors)?;
    let snapshot = quietly(ctx.api.load())?;
    let ids = resolve_selectors(&snapshot, &selectors);
    if ids.is_empty() {
        return Err(SnipzError::Api("No matching snippets".to_string()));
    }

    let items: Vec<_> = indexed(snapshot)
        .into_iter()
        .filter(|item| ids.contains(&item.snippet.id))
        .collect();
    let categories = ctx.api.categories().value;
    print_full_snippets(&items, &categories, ctx.config.mask_sensitive && !reveal);
    Ok(())
}

pub fn handle_add(
    ctx: &mut AppContext,
    text: String,
    label: String,
    tags: Vec<String>,
    markdown: bool,
    template: bool,
) -> Result<()> {
    let mut snippet = Snippet::new(text)
        .with_label(label)
        .markdown(markdown)
        .template(template);
    for tag in &tags {
        snippet.add_tag(tag.trim());
    }
    finish(ctx.api.add_snippets(vec![snippet]))?;
    Ok(())
}

pub fn handle_use(ctx: &mut AppContext, selector: String) -> Result<()> {
    let selector = single_selector(&selector)?;
    finish(ctx.api.instantiate_template(selector))?;
    Ok(())
}

pub fn handle_update(
    ctx: &mut AppContext,
    selectors: Vec<String>,
    patch: SnippetPatch,
) -> Result<()> {
    if patch.is_empty() {
        return Err(SnipzError::Api(
            "Nothing to update: pass at least one of --text, --label, --tags, --markdown, --template"
                .to_string(),
        ));
    }
    let selectors = parse_selectors(&selectors)?;
    finish(ctx.api.bulk_update(&selectors, &patch))?;
    Ok(())
}

pub fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let selectors = parse_selectors(&selectors)?;
    finish(ctx.api.bulk_delete(&selectors))?;
    Ok(())
}

pub fn handle_tag(ctx: &mut AppContext, action: TagAction) -> Result<()> {
    match action {
        TagAction::Add { tag, selectors } => {
            let selectors = parse_selectors(&selectors)?;
            finish(ctx.api.add_tag(&selectors, &tag))?;
        }
        TagAction::Remove { tag, selectors } => {
            let selectors = parse_selectors(&selectors)?;
            finish(ctx.api.remove_tag(&selectors, &tag))?;
        }
    }
    Ok(())
}

pub fn handle_toggle(ctx: &mut AppContext, flag: ToggleFlag, selectors: Vec<String>) -> Result<()> {
    let selectors = parse_selectors(&selectors)?;
    let result = match flag {
        ToggleFlag::Markdown => ctx.api.toggle_markdown(&selectors),
        ToggleFlag::Template => ctx.api.toggle_template(&selectors),
    };
    finish(result)?;
    Ok(())
}

pub fn handle_tags(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.all_tags();
    let tags = finish(result)?;
    print_tags(&tags);
    Ok(())
}

pub fn handle_templates(ctx: &mut AppContext) -> Result<()> {
    // Numbers shown must be positions in the full list, so `use N` picks the right one.
    let snapshot = quietly(ctx.api.load())?;
    let templates: Vec<_> = indexed(snapshot)
        .into_iter()
        .filter(|item| item.snippet.is_template)
        .collect();
    let categories = ctx.api.categories().value;
    print_snippets(&templates, &categories, ctx.config.mask_sensitive);
    Ok(())
}

pub fn handle_import(ctx: &mut AppContext, path: PathBuf, dry_run: bool) -> Result<()> {
    let snippets = finish(ctx.api.import(&path))?;
    if dry_run {
        print_plain_snippets(&snippets, ctx.config.mask_sensitive);
        return Ok(());
    }
    finish(ctx.api.add_snippets(snippets))?;
    Ok(())
}

pub fn handle_export(
    ctx: &mut AppContext,
    path: PathBuf,
    format: Option<String>,
    selectors: Vec<String>,
) -> Result<()> {
    // --format, then the file extension, then the configured default.
    let format = match format {
        Some(f) => Some(f.parse::<ExportFormat>()?),
        None => ExportFormat::from_path(&path).or(ctx.config.export_format()?),
    };

    let snapshot = quietly(ctx.api.load())?;
    let snippets = if selectors.is_empty() {
        snapshot
    } else {
        let selectors = parse_selectors(&selectors)?;
        let ids = resolve_selectors(&snapshot, &selectors);
        snapshot
            .into_iter()
            .filter(|s| ids.contains(&s.id))
            .collect()
    };

    finish(ctx.api.export(&snippets, &path, format))?;
    Ok(())
}

pub fn handle_mask(text: Option<String>) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    print!("{}", mask_sensitive_data(&text));
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn handle_genpass(
    ctx: &AppContext,
    length: Option<usize>,
    no_uppercase: bool,
    no_digits: bool,
    no_special: bool,
    strict: bool,
) -> Result<()> {
    let options = PasswordOptions {
        length: length.unwrap_or(ctx.config.password_length),
        uppercase: !no_uppercase,
        digits: !no_digits,
        special: !no_special,
        require_each_class: strict,
    };
    println!("{}", generate(&options)?);
    Ok(())
}

pub fn handle_category(ctx: &mut AppContext, action: Option<CategoryAction>) -> Result<()> {
    match action.unwrap_or(CategoryAction::List) {
        CategoryAction::List => {
            let registry = finish(ctx.api.categories())?;
            print_categories(&registry);
        }
        CategoryAction::Set { name, color } => {
            finish(ctx.api.set_category(&name, &color))?;
        }
        CategoryAction::Rename { old, new } => {
            finish(ctx.api.rename_category(&old, &new))?;
        }
        CategoryAction::Delete { name } => {
            finish(ctx.api.delete_category(&name))?;
        }
    }
    Ok(())
}

pub fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            let mut config = ctx.config.clone();
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            ctx.config = config;
            print_message(&CmdMessage::success(format!(
                "Set {} = {}",
                key,
                ctx.config.get(&key)?
            )));
        }
    }
    Ok(())
}

fn single_selector(input: &str) -> Result<Selector> {
    let selectors = parse_selector_or_range(input)?;
    match selectors.as_slice() {
        [selector] => Ok(*selector),
        _ => Err(SnipzError::Api(format!(
            "Expected a single snippet, got '{}'",
            input
        ))),
    }
}
