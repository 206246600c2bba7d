//! CSV header parsing and normalization.

use std::collections::HashMap;

/// Result of CSV header analysis.
#[derive(Debug, Clone)]
pub struct CsvHeaders {
    /// Normalized column names (trimmed, duplicates disambiguated).
    pub columns: Vec<String>,
    /// Headers that were renamed because an earlier column had the same name.
    pub renamed: Vec<(String, String)>,
}

impl CsvHeaders {
    /// Normalizes raw header cells.
    ///
    /// Every name is trimmed. A repeated name keeps its first occurrence and
    /// later copies become `Name.1`, `Name.2`, ... so no column silently
    /// shadows another.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut columns = Vec::new();
        let mut renamed = Vec::new();

        for cell in raw {
            let name = normalize_header(cell.as_ref());
            let count = seen.entry(name.clone()).or_insert(0);
            if *count == 0 {
                columns.push(name);
            } else {
                let unique = format!("{name}.{count}");
                renamed.push((name.clone(), unique.clone()));
                columns.push(unique);
            }
            *count += 1;
        }

        Self { columns, renamed }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True when every header cell is blank.
    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(|c| c.is_empty())
    }
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Full Name  "), "Full Name");
        assert_eq!(normalize_header("Products"), "Products");
    }

    #[test]
    fn test_headers_trimmed() {
        let headers = CsvHeaders::from_raw([" Full Name", "Last Name ", "Products"]);
        assert_eq!(headers.columns, vec!["Full Name", "Last Name", "Products"]);
        assert!(headers.renamed.is_empty());
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_duplicate_headers_disambiguated() {
        let headers = CsvHeaders::from_raw(["Phone", " Phone", "Phone"]);
        assert_eq!(headers.columns, vec!["Phone", "Phone.1", "Phone.2"]);
        assert_eq!(headers.renamed.len(), 2);
    }

    #[test]
    fn test_blank_headers() {
        assert!(CsvHeaders::from_raw(["", "  "]).is_blank());
        assert!(!CsvHeaders::from_raw(["", "A"]).is_blank());
    }
}
