// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! A two-dimensional, column-oriented table of named [`TypedColumn`]s.

use indexmap::IndexMap;

use crate::column::TypedColumn;
use crate::error::{Error, Result};

/// A two-dimensional dataset of named columns, each the same length.
///
/// Columns keep the order in which they appear in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: IndexMap<String, TypedColumn>,
    num_rows: usize,
}

impl Table {
    /// Creates a [`Table`] from columns.
    ///
    /// Expects the following:
    ///  * each column to have `num_rows` values
    ///  * column names to be unique
    ///
    /// If the conditions are not met, an error is returned.
    pub fn try_new(columns: Vec<TypedColumn>, num_rows: usize) -> Result<Self> {
        let mut map = IndexMap::with_capacity(columns.len());
        for column in columns {
            if column.len() != num_rows {
                return Err(Error::InvalidArgumentError(format!(
                    "column \"{}\" has {} values but the table has {} rows",
                    column.name(),
                    column.len(),
                    num_rows
                )));
            }
            let name = column.name().to_string();
            if map.insert(name, column).is_some() {
                return Err(Error::InvalidArgumentError(
                    "all columns in a table must have unique names".to_string(),
                ));
            }
        }
        Ok(Self {
            columns: map,
            num_rows,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The column names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|x| x.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&TypedColumn> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &TypedColumn> {
        self.columns.values()
    }

    pub fn into_columns(self) -> IndexMap<String, TypedColumn> {
        self.columns
    }
}
