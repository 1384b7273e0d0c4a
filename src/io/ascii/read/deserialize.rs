use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    column::{TypedColumn, Values},
    datatypes::DataType,
    error::{Error, Result},
    table::Table,
};

use super::{buffer::ColumnBuffer, fill, options::ReadOptions};

fn deserialize_primitive<T, F>(rows: &[&[u8]], op: F) -> Result<Vec<T>>
where
    F: Fn(&[u8]) -> Option<T>,
{
    rows.iter()
        .map(|bytes| {
            op(bytes).ok_or_else(|| {
                Error::ExternalFormat(format!(
                    "\"{}\" could not be parsed",
                    String::from_utf8_lossy(bytes)
                ))
            })
        })
        .collect()
}

fn deserialize_utf8(rows: &[&[u8]]) -> Result<Vec<String>> {
    rows.iter()
        .map(|bytes| {
            simdutf8::basic::from_utf8(bytes)
                .map(|x| x.to_string())
                .map_err(Error::from)
        })
        .collect()
}

/// Deserializes `rows` into [`Values`] of `data_type`.
pub fn deserialize_column(rows: &[&[u8]], data_type: DataType) -> Result<Values> {
    Ok(match data_type {
        DataType::Int64 => Values::Int64(deserialize_primitive(rows, |bytes| {
            lexical_core::parse::<i64>(bytes).ok()
        })?),
        DataType::Float64 => Values::Float64(deserialize_primitive(rows, |bytes| {
            lexical_core::parse::<f64>(bytes).ok()
        })?),
        DataType::Utf8 => Values::Utf8(deserialize_utf8(rows)?),
    })
}

/// The names of the columns, either given or `col1..colN`.
fn resolve_names(names: Option<&[String]>, num_columns: usize) -> Result<Vec<String>> {
    let names = match names {
        Some(names) => {
            if names.len() != num_columns {
                return Err(Error::InvalidArgumentError(format!(
                    "{} names were given but the table has {} columns",
                    names.len(),
                    num_columns
                )));
            }
            names.to_vec()
        }
        None => (0..num_columns).map(|i| format!("col{}", i + 1)).collect(),
    };
    let mut seen = HashSet::with_capacity(names.len());
    if let Some(name) = names.iter().find(|x| !seen.insert(x.as_str())) {
        return Err(Error::InvalidArgumentError(format!(
            "column name \"{}\" is duplicated",
            name
        )));
    }
    Ok(names)
}

fn check_known(list: &str, requested: &[String], names: &[String]) -> Result<()> {
    match requested.iter().find(|x| !names.contains(x)) {
        Some(name) => Err(Error::InvalidArgumentError(format!(
            "{} contains \"{}\" which is not a column name",
            list, name
        ))),
        None => Ok(()),
    }
}

/// Indices of the columns kept by `include_names` and `exclude_names`.
/// An empty `include_names` keeps every column. A name present in both is excluded.
fn select(names: &[String], options: &ReadOptions) -> Result<Vec<usize>> {
    let include = options.include_names.as_ref().filter(|x| !x.is_empty());
    if let Some(include) = include {
        check_known("include_names", include, names)?;
    }
    if let Some(exclude) = &options.exclude_names {
        check_known("exclude_names", exclude, names)?;
    }
    Ok(names
        .iter()
        .enumerate()
        .filter(|(_, name)| include.map(|x| x.contains(name)).unwrap_or(true))
        .filter(|(_, name)| {
            options
                .exclude_names
                .as_ref()
                .map(|exclude| !exclude.contains(name))
                .unwrap_or(true)
        })
        .map(|(i, _)| i)
        .collect())
}

/// Replaces every value matching a rule's pattern by its replacement, and returns
/// which values were kept (`None` if all were).
fn apply_fill<'a>(rows: &mut [&'a [u8]], rules: &fill::FillRules<'a>) -> Option<Vec<bool>> {
    if rules.is_empty() {
        return None;
    }
    let mut validity = vec![true; rows.len()];
    let mut replaced = false;
    for (row, is_valid) in rows.iter_mut().zip(validity.iter_mut()) {
        let replacement = simdutf8::basic::from_utf8(row)
            .ok()
            .and_then(|x| rules.get(x));
        if let Some(&replacement) = replacement {
            *row = replacement.as_bytes();
            *is_valid = false;
            replaced = true;
        }
    }
    if replaced {
        Some(validity)
    } else {
        None
    }
}

/// Converts the tokenized `columns` into a [`Table`].
///
/// # Implementation
/// * every buffer is decoded into exactly `num_rows` values
/// * columns are named by `names`, or `col1..colN` when `None`
/// * columns are selected by `options.include_names` and then `options.exclude_names`
/// * values matching a fill value are replaced and marked invalid
/// * each column takes the first type of [`crate::datatypes::CANDIDATES`] that
///   validates all of its values
pub fn materialize(
    columns: Vec<ColumnBuffer>,
    names: Option<&[String]>,
    num_rows: usize,
    options: &ReadOptions,
) -> Result<Table> {
    let decoded = columns
        .iter()
        .enumerate()
        .map(|(i, column)| column.decode(i, num_rows))
        .collect::<Result<Vec<_>>>()?;

    let names = resolve_names(names, columns.len())?;
    let selected = select(&names, options)?;
    let all_names = names.iter().map(|x| x.as_str()).collect::<Vec<_>>();
    let selected_names = selected.iter().map(|i| all_names[*i]).collect::<Vec<_>>();
    let rules = fill::resolve(&all_names, &selected_names, options);

    let mut typed = Vec::with_capacity(selected.len());
    for ((index, name), rules) in selected.iter().zip(selected_names).zip(rules.iter()) {
        let mut rows = decoded[*index].clone();
        let validity = apply_fill(&mut rows, rules);

        let data_type = DataType::infer(rows.iter().copied());
        trace!(column = name, %data_type, "inferred column type");
        let values = deserialize_column(&rows, data_type)?;
        typed.push(TypedColumn::new(name.to_string(), values, validity));
    }

    debug!(
        num_rows,
        num_columns = typed.len(),
        "materialized table"
    );
    Table::try_new(typed, num_rows)
}
