//! Plain-text table formatting for gallery listings.

use folio_core::models::Work;

const TITLE_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 22;

/// Column headings matching `format_work_row`
pub fn work_header() -> String {
    format!(
        "{:>4}  {:<title_w$}  {:<cat_w$}  {}",
        "ID",
        "TITRE",
        "CATÉGORIE",
        "IMAGE",
        title_w = TITLE_WIDTH,
        cat_w = CATEGORY_WIDTH,
    )
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// One listing row: id, title, category name and image URL
pub fn format_work_row(work: &Work, category: Option<&str>) -> String {
    format!(
        "{:>4}  {:<title_w$}  {:<cat_w$}  {}",
        work.id,
        truncate_string(&work.title, TITLE_WIDTH),
        truncate_string(category.unwrap_or("-"), CATEGORY_WIDTH),
        work.image_url,
        title_w = TITLE_WIDTH,
        cat_w = CATEGORY_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hello", 3), "hel");
        // Counts characters, not bytes
        assert_eq!(truncate_string("Hôtels & restaurants", 9), "Hôtels...");
    }

    #[test]
    fn test_format_work_row() {
        let work = Work {
            id: 3,
            title: "Villa".to_string(),
            image_url: "http://localhost:5678/images/villa.png".to_string(),
            category_id: 2,
            user_id: None,
            category: None,
        };

        let row = format_work_row(&work, Some("Appartements"));
        assert!(row.starts_with("   3  Villa"));
        assert!(row.contains("Appartements"));
        assert!(row.ends_with("villa.png"));

        assert!(format_work_row(&work, None).contains("  -  "));
    }

    #[test]
    fn test_header_lines_up_with_rows() {
        let header = work_header();
        assert_eq!(header.find("TITRE"), Some(6));
        assert_eq!(header.find("IMAGE").map(|i| header[..i].chars().count()), Some(6 + TITLE_WIDTH + 2 + CATEGORY_WIDTH + 2));
    }
}
