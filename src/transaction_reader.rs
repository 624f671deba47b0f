// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reads datasets in the format:
//!
//! ```text
//! <number of transactions> <number of items>
//! <transaction id> <item> <count>
//! ...
//! ```
//!
//! Records of one transaction need not be adjacent. Transactions are
//! returned in increasing transaction id order.

use crate::error::{DatasetError, Result};
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemizer::Itemizer;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::str;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetHeader {
    pub num_transactions: usize,
    pub num_items: usize,
}

#[derive(Debug, PartialEq, Eq)]
struct Record {
    tid: i64,
    item: String,
    count: u32,
}

/// A fully read dataset. Transactions hold each item at most once, in no
/// particular order.
pub struct Dataset {
    pub header: DatasetHeader,
    pub itemizer: Itemizer,
    pub transactions: Vec<Vec<(Item, u32)>>,
    pub item_count: ItemCounter,
    pub skipped_records: usize,
}

impl Dataset {
    /// Transactions ready for insertion into an `FPTree`: items below
    /// `min_count` removed, remaining items sorted by decreasing count.
    /// Transactions left with no items are dropped.
    pub fn frequent_transactions(&self, min_count: u32) -> Vec<Vec<(Item, u32)>> {
        self.transactions
            .iter()
            .filter_map(|transaction| {
                let mut transaction = transaction.clone();
                self.item_count.filter_and_sort(&mut transaction, min_count);
                if transaction.is_empty() {
                    None
                } else {
                    Some(transaction)
                }
            })
            .collect()
    }
}

pub struct TransactionReader<R> {
    reader: R,
    line_number: usize,
    skipped_records: usize,
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R) -> TransactionReader<R> {
        TransactionReader {
            reader,
            line_number: 0,
            skipped_records: 0,
        }
    }

    fn read_line(&mut self, line: &mut Vec<u8>) -> Result<bool> {
        line.clear();
        let len = self.reader.read_until(b'\n', line)?;
        if len == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        Ok(true)
    }

    fn read_header(&mut self) -> Result<DatasetHeader> {
        let mut line = vec![];
        if !self.read_line(&mut line)? {
            return Err(DatasetError::EmptyDataset);
        }
        let line = String::from_utf8_lossy(&line);
        parse_header(&line).ok_or_else(|| DatasetError::InvalidHeader {
            line: line.trim().to_owned(),
        })
    }

    // Malformed records are logged and skipped.
    fn next_record(&mut self) -> Result<Option<Record>> {
        let mut buf = vec![];
        while self.read_line(&mut buf)? {
            let line = match str::from_utf8(&buf) {
                Ok(line) => line,
                Err(_) => {
                    warn!(line = self.line_number, "skipping record that is not valid UTF-8");
                    self.skipped_records += 1;
                    continue;
                }
            };
            if let Some(record) = parse_record(line) {
                return Ok(Some(record));
            }
            if !line.trim().is_empty() {
                warn!(line = self.line_number, "skipping malformed record {:?}", line.trim());
                self.skipped_records += 1;
            }
        }
        Ok(None)
    }

    pub fn read_dataset(mut self) -> Result<Dataset> {
        let header = self.read_header()?;

        // Every later sum of counts, in a transaction or in any tree, is at
        // most some item's total. Records overflowing a total are skipped.
        let mut totals: FnvHashMap<String, u32> = FnvHashMap::default();
        let mut grouped: BTreeMap<i64, Vec<(String, u32)>> = BTreeMap::new();
        while let Some(record) = self.next_record()? {
            let total = totals.get(&record.item).cloned().unwrap_or(0);
            match total.checked_add(record.count) {
                Some(total) => {
                    totals.insert(record.item.clone(), total);
                }
                None => {
                    warn!(
                        line = self.line_number,
                        "skipping record: support of {:?} overflows",
                        record.item
                    );
                    self.skipped_records += 1;
                    continue;
                }
            }
            grouped
                .entry(record.tid)
                .or_insert_with(Vec::new)
                .push((record.item, record.count));
        }

        let itemizer = Itemizer::from_labels(
            grouped
                .values()
                .flat_map(|records| records.iter().map(|(label, _)| label)),
        );

        let mut item_count = ItemCounter::new();
        let mut transactions = Vec::with_capacity(grouped.len());
        for records in grouped.values() {
            // Some input files repeat an item within a transaction.
            // Merge repeats into one entry.
            let transaction: Vec<(Item, u32)> = records
                .iter()
                .filter_map(|(label, count)| itemizer.id_of(label).map(|item| (item, *count)))
                .sorted_by_key(|&(item, _)| item)
                .coalesce(|a, b| {
                    if a.0 == b.0 {
                        Ok((a.0, a.1 + b.1))
                    } else {
                        Err((a, b))
                    }
                })
                .collect();
            for (item, count) in &transaction {
                item_count.add(item, *count);
            }
            transactions.push(transaction);
        }

        if transactions.len() != header.num_transactions {
            warn!(
                declared = header.num_transactions,
                found = transactions.len(),
                "transaction count differs from header"
            );
        }
        if itemizer.len() != header.num_items {
            warn!(
                declared = header.num_items,
                found = itemizer.len(),
                "item count differs from header"
            );
        }

        Ok(Dataset {
            header,
            itemizer,
            transactions,
            item_count,
            skipped_records: self.skipped_records,
        })
    }
}

pub fn read_dataset_file(path: &str) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_owned(),
        source,
    })?;
    TransactionReader::new(BufReader::new(file)).read_dataset()
}

fn parse_header(line: &str) -> Option<DatasetHeader> {
    let mut tokens = line.split_whitespace();
    let num_transactions = tokens.next()?.parse::<usize>().ok()?;
    let num_items = tokens.next()?.parse::<usize>().ok()?;
    Some(DatasetHeader {
        num_transactions,
        num_items,
    })
}

fn parse_record(line: &str) -> Option<Record> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }
    let tid = tokens[0].parse::<i64>().ok()?;
    let count = tokens[2].parse::<u32>().ok()?;
    if count == 0 {
        return None;
    }
    Some(Record {
        tid,
        item: tokens[1].to_owned(),
        count,
    })
}
