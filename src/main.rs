mod command_line_args;

use command_line_args::parse_args_or_exit;
use command_line_args::Arguments;
use fpgrowth::fptree::{fp_growth, FPTree, ItemSet};
use fpgrowth::item::Item;
use fpgrowth::itemset_writer::write_itemsets;
use fpgrowth::transaction_reader::read_dataset_file;

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::{debug, info, Level};

fn mine_fp_growth(args: &Arguments) -> Result<(), Box<dyn Error>> {
    info!("Mining data set: {}", args.input_file_path);
    info!("Reading dataset and counting item frequencies...");
    let start = Instant::now();
    let timer = Instant::now();
    let dataset = read_dataset_file(&args.input_file_path)?;
    info!(
        "Read {} transactions over {} items ({} records skipped) in {} ms.",
        dataset.transactions.len(),
        dataset.itemizer.len(),
        dataset.skipped_records,
        timer.elapsed().as_millis()
    );
    debug!(
        "{} items have support of at least {}.",
        dataset
            .item_count
            .items_with_count_at_least(args.min_support)
            .len(),
        args.min_support
    );

    info!("Building initial FPTree based on item frequencies...");
    let timer = Instant::now();
    let mut fptree: FPTree<Item> = FPTree::new();
    for transaction in dataset.frequent_transactions(args.min_support) {
        fptree.insert(&transaction);
    }
    info!(
        "Building initial FPTree of {} transactions and {} nodes took {} ms.",
        fptree.num_transactions(),
        fptree.num_nodes(),
        timer.elapsed().as_millis()
    );

    info!("Starting recursive FPGrowth...");
    let timer = Instant::now();
    let mut itemsets: Vec<ItemSet<Item>> = vec![];
    fp_growth(&fptree, args.min_support, &[], &mut itemsets);
    info!(
        "FPGrowth generated {} frequent itemsets in {} ms.",
        itemsets.len(),
        timer.elapsed().as_millis()
    );

    let timer = Instant::now();
    {
        let mut output = BufWriter::new(File::create(&args.output_itemsets_path)?);
        write_itemsets(
            &mut output,
            &itemsets,
            args.min_support,
            &dataset.itemizer,
        )?;
        output.flush()?;
    }
    info!(
        "Wrote itemsets to {} in {} ms.",
        args.output_itemsets_path,
        timer.elapsed().as_millis()
    );

    info!("Total runtime: {} ms", start.elapsed().as_millis());

    Ok(())
}

fn main() {
    let arguments = parse_args_or_exit();

    let level = if arguments.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(err) = mine_fp_growth(&arguments) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
