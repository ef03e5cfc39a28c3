//! Defaults and option parsing helpers

/// Extensions indexed when `--exts` is not given
pub const DEFAULT_EXTENSIONS: &str = ".epub,.pdf,.mobi,.azw,.azw3";

/// Path substring marking the unorganized subtree
pub const DEFAULT_UNORGANIZED_TOKEN: &str = "Unorganized";

/// File name of the index database inside the ebookr directory
pub const INDEX_FILE_NAME: &str = "index.redb";

/// Parse a comma-separated extension list into normalized form:
/// trimmed, lowercased, with a leading dot. Empty tokens are dropped.
pub fn parse_extensions(csv: &str) -> Vec<String> {
	csv.split(',')
		.map(|e| e.trim().to_lowercase())
		.filter(|e| !e.is_empty() && e != ".")
		.map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_default_extensions() {
		let exts = parse_extensions(DEFAULT_EXTENSIONS);
		assert_eq!(exts, vec![".epub", ".pdf", ".mobi", ".azw", ".azw3"]);
	}

	#[test]
	fn test_parse_normalizes_case_and_dot() {
		let exts = parse_extensions("EPUB, .Pdf ,cbz");
		assert_eq!(exts, vec![".epub", ".pdf", ".cbz"]);
	}

	#[test]
	fn test_parse_drops_empty_tokens() {
		let exts = parse_extensions(",.epub,, ,");
		assert_eq!(exts, vec![".epub"]);
	}
}

// vim: ts=4
