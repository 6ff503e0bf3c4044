use crate::diagnostics::{DiagnosticKey, Diagnostics};
use crate::record::RawRecord;
use crate::types::RawValue;

/// Fill absent or missing `fixable` fields with `0`, reporting each field once.
pub fn sanitize(mut record: RawRecord, fixable: &[&str], diagnostics: &mut Diagnostics) -> RawRecord {
    for &field in fixable {
        if !record.is_present(field) {
            record.insert(field, RawValue::Integer(0));
            diagnostics.warn_once(DiagnosticKey::MissingField(field.into()));
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warns_once_per_field() {
        let mut diagnostics = Diagnostics::new();
        for _ in 0..3 {
            let record = RawRecord::new()
                .with("I.MQ", RawValue::Missing)
                .with("I.MQ0", 2.0);
            let record = sanitize(record, &["I.MQ", "I.MQ0", "S.1.DP"], &mut diagnostics);
            assert_eq!(record.get("I.MQ"), Some(&RawValue::Integer(0)));
            assert_eq!(record.get("I.MQ0"), Some(&RawValue::Float(2.0)));
            assert_eq!(record.get("S.1.DP"), Some(&RawValue::Integer(0)));
        }
        assert_eq!(
            diagnostics.emitted(),
            [
                DiagnosticKey::MissingField("I.MQ".into()),
                DiagnosticKey::MissingField("S.1.DP".into())
            ]
        );
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut diagnostics = Diagnostics::new();
        let record = RawRecord::new().with("I.NT", RawValue::Missing);
        let record = sanitize(record, &["I.QSS_NT"], &mut diagnostics);
        assert_eq!(record.get("I.NT"), Some(&RawValue::Missing));
        assert!(!record.is_present("I.NT"));
    }
}
