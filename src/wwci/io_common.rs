use std::path::{Path, PathBuf};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Ids for records that do not carry a survey id, from their position in the file.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |idx| format!("{}-{:08}", simplified_file_name, idx)
}

/// Paths in a configuration are relative to the configuration file.
pub fn resolve_path(root: Option<&Path>, file_path: &str) -> String {
    let p: PathBuf = match root {
        Some(r) => r.join(file_path),
        None => PathBuf::from(file_path),
    };
    p.display().to_string()
}

pub fn report_file_name(survey_id: &str) -> String {
    let safe: String = survey_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("Cancer_Support_Report_{}.md", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("a/b/export.json"), "export.json");
        assert_eq!(make_default_id("a/export.json")(3), "export.json-00000003");
        assert_eq!(
            report_file_name("CAC 2026/17"),
            "Cancer_Support_Report_CAC_2026_17.md"
        );
        assert_eq!(
            resolve_path(Some(Path::new("testdata/x")), "in.json"),
            Path::new("testdata/x").join("in.json").display().to_string()
        );
    }
}
