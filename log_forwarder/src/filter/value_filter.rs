use crate::filter::{Filter, FilterCondition, FilterKind};
use crate::message::Message;
use anyhow::{bail, Context};
use regex::Regex;

/// Content filter over the message value, built from a filter-expression
/// string of the form `condition:argument`:
///
/// - `contains:<text>` / `not-contains:<text>`
/// - `regex:<pattern>` / `not-regex:<pattern>`
///
/// The value bytes are matched lossily as UTF-8.
#[derive(Debug)]
pub struct ValueFilter {
    filter_kind: FilterKind,
    filter_condition: FilterCondition,
}

impl ValueFilter {
    pub fn parse(expression: &str) -> Result<Self, anyhow::Error> {
        let Some((condition, argument)) = expression.split_once(':') else {
            bail!("Filter expression '{expression}' is missing a ':' separator")
        };

        let (filter_condition, is_regex) = match condition {
            "contains" => (FilterCondition::Contains, false),
            "not-contains" => (FilterCondition::NotContains, false),
            "regex" => (FilterCondition::Contains, true),
            "not-regex" => (FilterCondition::NotContains, true),
            other => bail!("Unknown filter condition: {other}"),
        };

        let filter_kind = if is_regex {
            let regex = Regex::new(argument)
                .with_context(|| format!("While compiling filter regex '{argument}'"))?;
            FilterKind::Regex(regex)
        } else {
            FilterKind::String(argument.to_owned())
        };

        Ok(Self {
            filter_kind,
            filter_condition,
        })
    }

    fn matches(&self, message: &Message) -> bool {
        let value = String::from_utf8_lossy(&message.value);

        let found = match &self.filter_kind {
            FilterKind::String(s) => value.contains(s),
            FilterKind::Regex(r) => r.is_match(&value),
        };

        match self.filter_condition {
            FilterCondition::Contains => found,
            FilterCondition::NotContains => !found,
        }
    }
}

impl Filter for ValueFilter {
    fn filter(&self, batch: Vec<Message>) -> Result<Vec<Message>, anyhow::Error> {
        Ok(batch
            .into_iter()
            .filter(|message| self.matches(message))
            .collect())
    }
}
