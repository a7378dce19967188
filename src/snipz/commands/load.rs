use crate::commands::CmdResult;
use crate::error::{Result, SnipzError};
use crate::model::Snippet;
use crate::store::{LoadOrigin, SnippetStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &SnippetStore<B>) -> Result<CmdResult<Vec<Snippet>>> {
    let loaded = store.load()?;
    let count = loaded.snippets.len();

    let result = match loaded.origin {
        LoadOrigin::Seeded => CmdResult::success(loaded.snippets, "Created default snippets"),
        LoadOrigin::File if count == 0 => CmdResult::info(loaded.snippets, "No snippets found"),
        LoadOrigin::File => {
            CmdResult::success(loaded.snippets, format!("Loaded {} saved snippets", count))
        }
    };
    Ok(result)
}

/// Fresh snapshot for commands that read before they write.
pub(crate) fn snapshot<B: StorageBackend>(store: &SnippetStore<B>) -> Result<Vec<Snippet>> {
    Ok(store.load()?.snippets)
}

/// User-facing description of a failed load.
pub fn describe_error(err: &SnipzError) -> String {
    match err {
        SnipzError::Format(_) => "Invalid snippet format".to_string(),
        SnipzError::Serialization(_) => "Error reading saved snippets file".to_string(),
        other => format!("Error loading snippets: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::{InMemoryStore, MemBackend};

    #[test]
    fn reports_seeding() {
        let store = InMemoryStore::new();
        let result = run(&store).unwrap();
        assert_eq!(result.value.len(), 2);
        assert_eq!(result.message.content, "Created default snippets");
    }

    #[test]
    fn reports_count() {
        let store = SnippetStore::with_backend(MemBackend::with_snippets(r#"["a", "b", "c"]"#));
        let result = run(&store).unwrap();
        assert_eq!(result.message.content, "Loaded 3 saved snippets");
        assert_eq!(result.message.level, MessageLevel::Success);

        let store = SnippetStore::with_backend(MemBackend::with_snippets(r#"["only"]"#));
        assert_eq!(run(&store).unwrap().message.content, "Loaded 1 saved snippets");
    }

    #[test]
    fn reports_empty_file() {
        let store = SnippetStore::with_backend(MemBackend::with_snippets("[]"));
        let result = run(&store).unwrap();
        assert!(result.value.is_empty());
        assert_eq!(result.message.content, "No snippets found");
        assert!(result.is_success());
    }

    #[test]
    fn describes_each_failure_kind() {
        let format = SnipzError::Format("object".into());
        assert_eq!(describe_error(&format), "Invalid snippet format");

        let parse = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert_eq!(
            describe_error(&SnipzError::Serialization(parse)),
            "Error reading saved snippets file"
        );

        let io = SnipzError::Io(std::io::Error::other("disk on fire"));
        assert!(describe_error(&io).starts_with("Error loading snippets:"));
    }
}
