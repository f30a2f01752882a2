//! Section labels of an advisory page.
//!
//! Each `.textbox` section carries its identity in the `alt` text of the
//! image inside its heading. This table is the whole contract with the
//! site's section layout; labels not listed here are ignored.

/// The detail field a section fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Abstract,
    Target,
    Detail,
    Impact,
    Measure,
    Vendor,
    Information,
    Supplement,
    Analysis,
    Reference,
}

/// Image alt-text label to field.
pub const SECTION_LABELS: [(&str, SectionField); 10] = [
    ("概要", SectionField::Abstract),
    ("影響を受けるシステム", SectionField::Target),
    ("詳細情報", SectionField::Detail),
    ("想定される影響", SectionField::Impact),
    ("対策方法", SectionField::Measure),
    ("ベンダ情報", SectionField::Vendor),
    ("参考情報", SectionField::Information),
    ("JPCERT/CCからの補足情報", SectionField::Supplement),
    ("JPCERT/CCによる脆弱性分析結果", SectionField::Analysis),
    ("関連文書", SectionField::Reference),
];

/// How a section's content is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Full normalized text of the section
    Text,
    /// First-column cells of the first table, header row skipped
    VendorTable,
    /// Second-column cells of the first table, every row
    ReferenceTable,
    /// `.cvss-line` elements
    ScoreLines,
}

impl SectionField {
    /// Look up the field for a section label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        SECTION_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, field)| *field)
    }

    pub fn kind(self) -> SectionKind {
        match self {
            SectionField::Vendor => SectionKind::VendorTable,
            SectionField::Reference => SectionKind::ReferenceTable,
            SectionField::Analysis => SectionKind::ScoreLines,
            _ => SectionKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(SectionField::from_label("概要"), Some(SectionField::Abstract));
        assert_eq!(
            SectionField::from_label(" JPCERT/CCによる脆弱性分析結果 "),
            Some(SectionField::Analysis)
        );
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(SectionField::from_label("新しいセクション"), None);
        assert_eq!(SectionField::from_label(""), None);
    }

    #[test]
    fn test_labels_are_unique() {
        for (i, (label, field)) in SECTION_LABELS.iter().enumerate() {
            for (other_label, other_field) in &SECTION_LABELS[i + 1..] {
                assert_ne!(label, other_label);
                assert_ne!(field, other_field);
            }
        }
    }

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(SectionField::Vendor.kind(), SectionKind::VendorTable);
        assert_eq!(SectionField::Reference.kind(), SectionKind::ReferenceTable);
        assert_eq!(SectionField::Analysis.kind(), SectionKind::ScoreLines);
        assert_eq!(SectionField::Impact.kind(), SectionKind::Text);
    }
}
