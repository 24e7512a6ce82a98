/// How raw input lines are cut into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOptions {
    pub group_separator: char,
    pub field_separator: char,
    pub trim_fields: bool,
    pub skip_header: bool,
    pub comment_prefix: Option<String>,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            group_separator: '\t',
            field_separator: ',',
            trim_fields: false,
            skip_header: false,
            comment_prefix: None,
        }
    }
}

/// One field group from the input, still untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the input.
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRecord {
    pub fn id(&self) -> &str {
        self.field(0).unwrap_or_default()
    }

    pub fn manager_id(&self) -> Option<&str> {
        self.field(1)
    }

    pub fn salary_text(&self) -> Option<&str> {
        self.field(2)
    }

    fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
}

/// Splits every line into its field groups, and each group into fields.
/// Only the first three fields of a group carry meaning; the rest are kept
/// but ignored downstream.
pub fn split_records<I, S>(lines: I, options: &RecordOptions) -> Vec<RawRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let skip = usize::from(options.skip_header);
    let mut records = Vec::new();

    for (idx, line) in lines.into_iter().enumerate().skip(skip) {
        let line = line.as_ref();
        if let Some(prefix) = options.comment_prefix.as_deref() {
            if !prefix.is_empty() && line.trim_start().starts_with(prefix) {
                continue;
            }
        }

        for group in line.split(options.group_separator) {
            let fields = group
                .split(options.field_separator)
                .map(|field| {
                    if options.trim_fields {
                        field.trim().to_string()
                    } else {
                        field.to_string()
                    }
                })
                .collect();
            records.push(RawRecord {
                line: idx + 1,
                fields,
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::{split_records, RecordOptions};

    #[test]
    fn splits_groups_then_fields() {
        let records = split_records(["1,,100\t2,1,50", "3,1,20,extra"], &RecordOptions::default());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[0].id(), "1");
        assert_eq!(records[0].manager_id(), Some(""));
        assert_eq!(records[1].line, 1);
        assert_eq!(records[1].salary_text(), Some("50"));
        assert_eq!(records[2].line, 2);
        assert_eq!(records[2].fields.len(), 4);
    }

    #[test]
    fn short_groups_expose_missing_fields() {
        let records = split_records(["4"], &RecordOptions::default());
        assert_eq!(records[0].id(), "4");
        assert_eq!(records[0].manager_id(), None);
        assert_eq!(records[0].salary_text(), None);
    }

    #[test]
    fn blank_line_is_a_record_with_empty_id() {
        let records = split_records([""], &RecordOptions::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "");
    }

    #[test]
    fn header_comments_and_trimming() {
        let options = RecordOptions {
            field_separator: ';',
            trim_fields: true,
            skip_header: true,
            comment_prefix: Some("#".to_string()),
            ..RecordOptions::default()
        };
        let records = split_records(
            ["id;manager;salary", "# note", " 1 ; ; 10 "],
            &options,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[0].fields, vec!["1", "", "10"]);
    }
}
