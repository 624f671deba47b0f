use crate::fptree::ItemSet;
use crate::item::Item;
use crate::itemizer::Itemizer;
use std::io::{self, Write};

/// Writes one line per itemset, `{a, b} : support`, preceded by a title
/// line naming the minimum support.
pub fn write_itemsets<W: Write>(
    output: &mut W,
    itemsets: &[ItemSet<Item>],
    min_count: u32,
    itemizer: &Itemizer,
) -> io::Result<()> {
    writeln!(output, "Frequent Itemsets (MinSup = {}):", min_count)?;
    for itemset in itemsets {
        writeln!(
            output,
            "{{{}}} : {}",
            Item::item_vec_to_string(&itemset.items, itemizer),
            itemset.support
        )?;
    }
    Ok(())
}
