use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::options::{FillValue, ReadOptions};

/// Pattern -> replacement rules of a single column.
pub type FillRules<'a> = HashMap<&'a str, &'a str>;

fn unknown<'b>(requested: &'b [String], known: &HashSet<&str>) -> Vec<&'b str> {
    requested
        .iter()
        .map(|x| x.as_str())
        .filter(|x| !known.contains(x))
        .collect()
}

fn warn_unknown(list: &str, requested: &[String], known: &HashSet<&str>) {
    for name in unknown(requested, known) {
        warn!(column = %name, "{} names an unknown column; ignored", list);
    }
}

/// Resolves which [`FillValue`]s apply to each of `names`.
///
/// `all_names` are every column of the header, `names` the selected ones. Fill lists
/// are checked against `all_names`, so a column removed by the selection is not unknown.
///
/// A rule without explicit columns applies to every column in `fill_include_names`
/// (all columns when unset) that is not in `fill_exclude_names`. A rule with explicit
/// columns applies to exactly those. When two rules match the same pattern in a column,
/// the first rule wins.
pub fn resolve<'a>(
    all_names: &[&str],
    names: &[&str],
    options: &'a ReadOptions,
) -> Vec<FillRules<'a>> {
    let known: HashSet<&str> = all_names.iter().copied().collect();

    let mut fill_names: HashSet<&str> = names.iter().copied().collect();
    if let Some(include) = &options.fill_include_names {
        warn_unknown("fill_include_names", include, &known);
        let include: HashSet<&str> = include.iter().map(|x| x.as_str()).collect();
        fill_names.retain(|x| include.contains(x));
    }
    if let Some(exclude) = &options.fill_exclude_names {
        warn_unknown("fill_exclude_names", exclude, &known);
        for name in exclude {
            fill_names.remove(name.as_str());
        }
    }

    let mut rules = vec![FillRules::new(); names.len()];
    // reversed so that earlier rules overwrite later ones
    for FillValue {
        pattern,
        replacement,
        columns,
    } in options.fill_values.iter().rev()
    {
        for (name, column_rules) in names.iter().zip(rules.iter_mut()) {
            let applies = if columns.is_empty() {
                fill_names.contains(name)
            } else {
                columns.iter().any(|x| x == name)
            };
            if applies {
                column_rules.insert(pattern.as_str(), replacement.as_str());
            }
        }
    }
    rules
}
