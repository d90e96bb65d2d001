//! Custom-id state codec
//!
//! Components carry all paging and selection state in their custom id as
//! `key:arg0:arg1:...`. The key picks a component route on the command that
//! created the message; the arguments are positional and belong to that route.
//! Commands wrap their argument shapes in a type implementing [`ComponentState`]
//! so nothing outside this module splits strings by hand.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: `ComponentState` for typed per-command shapes
//! - 1.0.0: Encode, decode and page bumping

use std::str::FromStr;
use thiserror::Error;

pub const DELIMITER: char = ':';
/// Discord rejects custom ids longer than this many characters
pub const MAX_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomIdError {
    #[error("custom id field {0:?} contains ':'")]
    DelimiterInField(String),
    #[error("custom id is {0} characters long, the limit is {MAX_LEN}")]
    TooLong(usize),
    #[error("custom id has no argument at position {0}")]
    MissingField(usize),
    #[error("custom id argument {0:?} is not a number")]
    InvalidNumber(String),
    #[error("unknown custom id key {0:?}")]
    UnknownKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomId {
    pub key: String,
    pub args: Vec<String>,
}

impl CustomId {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl ToString) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.args.extend(args.into_iter().map(|arg| arg.to_string()));
        self
    }

    pub fn encode(&self) -> Result<String, CustomIdError> {
        encode(&self.key, &self.args)
    }

    pub fn decode(raw: &str) -> Self {
        let (key, args) = decode(raw);
        Self { key, args }
    }

    pub fn get(&self, index: usize) -> Result<&str, CustomIdError> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or(CustomIdError::MissingField(index))
    }

    pub fn number<T: FromStr>(&self, index: usize) -> Result<T, CustomIdError> {
        let field = self.get(index)?;
        field
            .parse()
            .map_err(|_| CustomIdError::InvalidNumber(field.to_string()))
    }
}

/// Join a key and its arguments into a custom id
pub fn encode<S: AsRef<str>>(key: &str, args: &[S]) -> Result<String, CustomIdError> {
    let mut encoded = String::from(key);
    check_field(key)?;
    for arg in args {
        let arg = arg.as_ref();
        check_field(arg)?;
        encoded.push(DELIMITER);
        encoded.push_str(arg);
    }

    let len = encoded.chars().count();
    if len > MAX_LEN {
        return Err(CustomIdError::TooLong(len));
    }
    Ok(encoded)
}

/// Split a custom id into its key and positional arguments
pub fn decode(raw: &str) -> (String, Vec<String>) {
    let mut fields = raw.split(DELIMITER).map(str::to_string);
    let key = fields.next().unwrap_or_default();
    (key, fields.collect())
}

/// Add `delta` to the page number stored at `index`
///
/// No clamping happens here; the handler clamps after refetching, since the
/// result set may have changed since the message was rendered.
pub fn bump_page(args: &[String], index: usize, delta: i64) -> Result<Vec<String>, CustomIdError> {
    let field = args.get(index).ok_or(CustomIdError::MissingField(index))?;
    let page: i64 = field
        .parse()
        .map_err(|_| CustomIdError::InvalidNumber(field.clone()))?;

    let mut bumped = args.to_vec();
    bumped[index] = page.saturating_add(delta).to_string();
    Ok(bumped)
}

fn check_field(field: &str) -> Result<(), CustomIdError> {
    if field.contains(DELIMITER) {
        return Err(CustomIdError::DelimiterInField(field.to_string()));
    }
    Ok(())
}

/// A typed view over one command's custom-id shapes
pub trait ComponentState: Sized {
    fn to_custom_id(&self) -> CustomId;

    fn from_custom_id(id: &CustomId) -> Result<Self, CustomIdError>;

    fn encode(&self) -> Result<String, CustomIdError> {
        self.to_custom_id().encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let encoded = encode("next", &["dart", "", "Logs", "1"]).unwrap();
        assert_eq!(encoded, "next:dart::Logs:1");

        let (key, args) = decode(&encoded);
        assert_eq!(key, "next");
        assert_eq!(args, vec!["dart", "", "Logs", "1"]);
    }

    #[test]
    fn test_key_only() {
        assert_eq!(encode::<&str>("entry", &[]).unwrap(), "entry");
        assert_eq!(CustomId::decode("entry"), CustomId::new("entry"));
    }

    #[test]
    fn test_builder_matches_free_function() {
        let id = CustomId::new("answer").arg(2).arg(0);
        assert_eq!(id.encode().unwrap(), "answer:2:0");
        assert_eq!(CustomId::decode("answer:2:0"), id);
    }

    #[test]
    fn test_delimiter_in_argument_rejected() {
        assert_eq!(
            encode("next", &["a:b"]).unwrap_err(),
            CustomIdError::DelimiterInField("a:b".to_string())
        );
        assert!(encode::<&str>("ne:xt", &[]).is_err());
    }

    #[test]
    fn test_length_limit() {
        let long = "x".repeat(MAX_LEN);
        assert_eq!(
            encode("k", &[long.as_str()]).unwrap_err(),
            CustomIdError::TooLong(MAX_LEN + 2)
        );

        let fits = "x".repeat(MAX_LEN - 2);
        assert!(encode("k", &[fits.as_str()]).is_ok());
    }

    #[test]
    fn test_bump_page() {
        let args: Vec<String> = vec!["p".into(), "v".into(), "3".into()];
        assert_eq!(bump_page(&args, 2, 1).unwrap()[2], "4");
        assert_eq!(bump_page(&args, 2, -5).unwrap()[2], "-2");
        assert_eq!(bump_page(&args, 2, 0).unwrap(), args);
    }

    #[test]
    fn test_bump_page_errors() {
        let args: Vec<String> = vec!["p".into(), "three".into()];
        assert_eq!(
            bump_page(&args, 1, 1).unwrap_err(),
            CustomIdError::InvalidNumber("three".to_string())
        );
        assert_eq!(
            bump_page(&args, 5, 1).unwrap_err(),
            CustomIdError::MissingField(5)
        );
    }

    #[test]
    fn test_number_argument() {
        let id = CustomId::decode("answer:2:x");
        assert_eq!(id.number::<usize>(0).unwrap(), 2);
        assert!(matches!(
            id.number::<usize>(1),
            Err(CustomIdError::InvalidNumber(_))
        ));
        assert_eq!(id.get(4), Err(CustomIdError::MissingField(4)));
    }
}
