/// parse task document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which
/// has titles and pairs key-vector of values into HashMap<String, HashMap<String, Vec<Value>>>.
///
/// Lines starting with //, #, % or ; are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Vec<Value>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// integers are accepted where a float is expected
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// identifier: letter or underscore followed by letters, digits and underscores
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title, trailing whitespace and newlines are dropped
fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_identifier(input)?;
    Ok((input.trim(), result))
}

fn parse_key(input: &str) -> IResult<&str, String> {
    parse_identifier(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value ends at commas, whitespace, newlines and semicolons
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    // space0, not multispace0: an empty value must not swallow the next line
    let (input, _) = space0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    value_parser.parse(input)
}

/// Parses a key-value pair where value is a list
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and one or more key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the document into a HashMap, a repeated section is merged into the first one
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;

    let mut result: DocumentMap = HashMap::new();
    for (title, section_map) in sections {
        result.entry(title).or_default().extend(section_map);
    }
    Ok((input, result))
}

/// Filters comments, parses the whole document and fails if anything is left unparsed.
/// An empty document gives an empty map.
pub fn parse_document_as(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        return Ok(HashMap::new());
    }
    match parse_document(filtered.trim()) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            Ok(parsed)
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("domain\n eta_max: 8.0").unwrap();
        assert_eq!(title, "domain");
        assert_eq!(remaining, "eta_max: 8.0");

        let (remaining, title) = parse_title("_solver2 tolerance: 1e-7").unwrap();
        assert_eq!(title, "_solver2");
        assert_eq!(remaining, "tolerance: 1e-7");
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("info, next").unwrap();
        assert_eq!(value, Value::String("info".to_string()));
        assert_eq!(remaining, ", next");

        let (_, value) = parse_value("100").unwrap();
        assert_eq!(value, Value::Integer(100));

        let (_, value) = parse_value("1e-7").unwrap();
        assert_eq!(value, Value::Float(1e-7));

        let (_, value) = parse_value("-0.25\n").unwrap();
        assert_eq!(value, Value::Float(-0.25));

        let (_, value) = parse_value("false").unwrap();
        assert_eq!(value, Value::Boolean(false));
    }

    #[test]
    fn test_parse_value_list() {
        let (remaining, values) = parse_value_list("0.01, 5").unwrap();
        assert_eq!(values, vec![Value::Float(0.01), Value::Integer(5)]);
        assert_eq!(remaining, "");

        let (remaining, values) = parse_value_list("").unwrap();
        assert_eq!(values, Vec::<Value>::new());
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, values)) = parse_key_value_pair("step : 0.1 , 0.2").unwrap();
        assert_eq!(key, "step");
        assert_eq!(values, vec![Value::Float(0.1), Value::Float(0.2)]);
        assert_eq!(remaining, "");

        let (remaining, (key, values)) = parse_key_value_pair("save_csv:\nnext: 1").unwrap();
        assert_eq!(key, "save_csv");
        assert!(values.is_empty());
        assert_eq!(remaining, "next: 1");
    }

    #[test]
    fn test_parse_section() {
        let input = "domain eta_max: 8.0 step: 0.1 solver";
        let (remaining, (title, map)) = parse_section(input).unwrap();
        assert_eq!(title, "domain");
        assert_eq!(map.len(), 2);
        assert_eq!(map["eta_max"], vec![Value::Float(8.0)]);
        assert_eq!(map["step"], vec![Value::Float(0.1)]);
        assert_eq!(remaining, "solver");
    }

    #[test]
    fn test_parse_document_multiline() {
        let input = "guesses\nold: 0.01\nnew: 5.0\ndomain\neta_max: 8\nstep: 0.1\n";
        let doc = parse_document_as(input).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["guesses"]["old"], vec![Value::Float(0.01)]);
        assert_eq!(doc["guesses"]["new"], vec![Value::Float(5.0)]);
        assert_eq!(doc["domain"]["eta_max"][0].as_float(), Some(8.0));
    }

    #[test]
    fn test_parse_document_with_comments() {
        let input = r#"
        // seeds of the secant method
        guesses
        old: 0.01
        # far field
        domain
        eta_max: 10.0

        ; output options
        output
        save_csv: profile
        "#;
        let doc = parse_document_as(input).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc["output"]["save_csv"][0].as_string().unwrap(), "profile");
    }

    #[test]
    fn test_repeated_section_is_merged() {
        let doc = parse_document_as("solver tolerance: 1e-6\nsolver max_iterations: 20").unwrap();
        assert_eq!(doc["solver"].len(), 2);
    }

    #[test]
    fn test_empty_and_malformed_document() {
        assert!(parse_document_as("").unwrap().is_empty());
        assert!(parse_document_as("// only a comment").unwrap().is_empty());
        assert!(parse_document_as("domain").is_err());
        assert!(parse_document_as("domain eta_max: 8.0 ???").is_err());
    }
}
