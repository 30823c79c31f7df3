//! Device record parsing.
//!
//! `lszdev --pairs` emits one device per line as whitespace-separated
//! `key="value"` tokens with shell quoting. Each line parses into a typed
//! [`DeviceRecord`]; any deviation from the expected vocabulary is a
//! [`ZdevError::MalformedRecord`] so that format drift in the external tool
//! fails loudly instead of producing a half-filled record.

use serde::Serialize;

use crate::error::{Result, ZdevError};

/// One physical or virtual channel device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    /// Device id; colon-joined for grouped sub-channels
    /// (e.g. `"0.0.0600:0.0.0601:0.0.0602"`). Opaque, never parsed further.
    pub id: String,
    /// Device type category (`dasd-eckd`, `qeth`, `generic-ccw`, ...).
    /// Open set; unknown values are preserved.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Device is currently active.
    pub on: bool,
    /// Device is physically present.
    pub exists: bool,
    /// Activation is persistent across reboot.
    pub pers: bool,
    /// Device activates automatically at boot.
    pub auto: bool,
    /// Last activation attempt failed.
    pub failed: bool,
    /// Assigned kernel device names; may be empty.
    pub names: String,
}

impl DeviceRecord {
    /// Parse one `lszdev --pairs` output line into a record.
    ///
    /// Required keys: `id`, `type`, `on`, `exists`, `pers`, `auto`,
    /// `failed`, `names`. Unexpected or repeated keys, tokens without `=`,
    /// and flag values other than `yes`/`no` are all rejected.
    pub fn parse(line: &str) -> Result<Self> {
        let mut id = None;
        let mut type_name = None;
        let mut on = None;
        let mut exists = None;
        let mut pers = None;
        let mut auto = None;
        let mut failed = None;
        let mut names = None;

        for word in split_words(line)? {
            let (key, value) = word.split_once('=').ok_or_else(|| {
                ZdevError::MalformedRecord {
                    detail: format!("token without '=': {word:?}"),
                }
            })?;
            match key {
                "id" => set_string(&mut id, key, value)?,
                "type" => set_string(&mut type_name, key, value)?,
                "on" => set_flag(&mut on, key, value)?,
                "exists" => set_flag(&mut exists, key, value)?,
                "pers" => set_flag(&mut pers, key, value)?,
                "auto" => set_flag(&mut auto, key, value)?,
                "failed" => set_flag(&mut failed, key, value)?,
                "names" => set_string(&mut names, key, value)?,
                _ => {
                    return Err(ZdevError::MalformedRecord {
                        detail: format!("unexpected key: {key:?}"),
                    })
                }
            }
        }

        Ok(Self {
            id: required(id, "id")?,
            type_name: required(type_name, "type")?,
            on: required(on, "on")?,
            exists: required(exists, "exists")?,
            pers: required(pers, "pers")?,
            auto: required(auto, "auto")?,
            failed: required(failed, "failed")?,
            names: required(names, "names")?,
        })
    }
}

fn set_string(slot: &mut Option<String>, key: &str, value: &str) -> Result<()> {
    if slot.is_some() {
        return Err(ZdevError::MalformedRecord {
            detail: format!("duplicate key: {key:?}"),
        });
    }
    *slot = Some(value.to_string());
    Ok(())
}

fn set_flag(slot: &mut Option<bool>, key: &str, value: &str) -> Result<()> {
    if slot.is_some() {
        return Err(ZdevError::MalformedRecord {
            detail: format!("duplicate key: {key:?}"),
        });
    }
    *slot = Some(match value {
        "yes" => true,
        "no" => false,
        other => {
            return Err(ZdevError::MalformedRecord {
                detail: format!("flag {key:?} is {other:?}, expected yes or no"),
            })
        }
    });
    Ok(())
}

fn required<T>(slot: Option<T>, key: &str) -> Result<T> {
    slot.ok_or_else(|| ZdevError::MalformedRecord {
        detail: format!("missing key: {key:?}"),
    })
}

/// Split a line into words the way a POSIX shell would.
///
/// Unquoted whitespace separates words; double quotes keep whitespace and
/// honor backslash escapes; single quotes are literal. A quoted segment
/// continues the surrounding word, so `id="0.0.0190"` is one word.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' => {
                chars.next();
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '"' => {
                chars.next();
                in_word = true;
                let mut closed = false;
                while let Some(&c) = chars.peek() {
                    if c == '"' {
                        chars.next();
                        closed = true;
                        break;
                    }
                    if c == '\\' {
                        chars.next();
                        if let Some(&escaped) = chars.peek() {
                            word.push(escaped);
                            chars.next();
                        }
                    } else {
                        word.push(c);
                        chars.next();
                    }
                }
                if !closed {
                    return Err(ZdevError::MalformedRecord {
                        detail: "unterminated double quote".to_string(),
                    });
                }
            }
            '\'' => {
                chars.next();
                in_word = true;
                let mut closed = false;
                while let Some(&c) = chars.peek() {
                    if c == '\'' {
                        chars.next();
                        closed = true;
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                if !closed {
                    return Err(ZdevError::MalformedRecord {
                        detail: "unterminated single quote".to_string(),
                    });
                }
            }
            '\\' => {
                chars.next();
                in_word = true;
                if let Some(&escaped) = chars.peek() {
                    word.push(escaped);
                    chars.next();
                }
            }
            _ => {
                chars.next();
                in_word = true;
                word.push(ch);
            }
        }
    }
    if in_word {
        words.push(word);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_quoted_pairs() {
        let words = split_words(r#"id="0.0.0190" names="""#).unwrap();
        assert_eq!(words, vec!["id=0.0.0190", "names="]);
    }

    #[test]
    fn test_split_words_quoted_space_stays_one_word() {
        let words = split_words(r#"names="dasda dasdb""#).unwrap();
        assert_eq!(words, vec!["names=dasda dasdb"]);
    }

    #[test]
    fn test_split_words_single_quotes_and_escapes() {
        let words = split_words(r#"a='x y' b="q\"z""#).unwrap();
        assert_eq!(words, vec!["a=x y", "b=q\"z"]);
    }

    #[test]
    fn test_split_words_unterminated_quote() {
        assert!(matches!(
            split_words(r#"id="0.0.0190"#),
            Err(ZdevError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse_full_record() {
        let record = DeviceRecord::parse(
            r#"id="x" type="t" on="yes" exists="no" pers="no" auto="no" failed="no" names="""#,
        )
        .unwrap();
        assert_eq!(record.id, "x");
        assert_eq!(record.type_name, "t");
        assert!(record.on);
        assert!(!record.exists);
        assert!(!record.pers);
        assert!(!record.auto);
        assert!(!record.failed);
        assert_eq!(record.names, "");
    }

    #[test]
    fn test_parse_grouped_id_kept_opaque() {
        let record = DeviceRecord::parse(
            r#"id="0.0.0600:0.0.0601:0.0.0602" type="qeth" on="yes" exists="yes" pers="yes" auto="no" failed="no" names="enc600""#,
        )
        .unwrap();
        assert_eq!(record.id, "0.0.0600:0.0.0601:0.0.0602");
        assert_eq!(record.type_name, "qeth");
        assert_eq!(record.names, "enc600");
    }

    #[test]
    fn test_parse_unknown_type_preserved() {
        let record = DeviceRecord::parse(
            r#"id="0.0.0001" type="ctc" on="no" exists="yes" pers="no" auto="no" failed="no" names="""#,
        )
        .unwrap();
        assert_eq!(record.type_name, "ctc");
    }

    #[test]
    fn test_parse_token_without_equals() {
        let err = DeviceRecord::parse(
            r#"id="x" bogus type="t" on="no" exists="no" pers="no" auto="no" failed="no" names="""#,
        )
        .unwrap_err();
        assert!(matches!(err, ZdevError::MalformedRecord { .. }));
    }

    #[test]
    fn test_parse_missing_key() {
        let err = DeviceRecord::parse(r#"id="x" type="t" on="no""#).unwrap_err();
        assert!(matches!(err, ZdevError::MalformedRecord { ref detail } if detail.contains("missing")));
    }

    #[test]
    fn test_parse_unexpected_key() {
        let err = DeviceRecord::parse(
            r#"id="x" type="t" on="no" exists="no" pers="no" auto="no" failed="no" names="" extra="1""#,
        )
        .unwrap_err();
        assert!(matches!(err, ZdevError::MalformedRecord { ref detail } if detail.contains("unexpected")));
    }

    #[test]
    fn test_parse_duplicate_key() {
        let err = DeviceRecord::parse(
            r#"id="x" id="y" type="t" on="no" exists="no" pers="no" auto="no" failed="no" names="""#,
        )
        .unwrap_err();
        assert!(matches!(err, ZdevError::MalformedRecord { ref detail } if detail.contains("duplicate")));
    }

    #[test]
    fn test_parse_non_boolean_flag_rejected() {
        let err = DeviceRecord::parse(
            r#"id="x" type="t" on="unknown" exists="no" pers="no" auto="no" failed="no" names="""#,
        )
        .unwrap_err();
        assert!(matches!(err, ZdevError::MalformedRecord { ref detail } if detail.contains("expected yes or no")));
    }
}
