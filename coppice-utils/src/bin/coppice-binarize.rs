use std::collections::HashSet;
use std::io::BufReader;

use clap::{App, AppSettings, Arg};
use stdinout::{Input, OrExit, Output};

use coppice::util::LabelSet;
use coppice::{mask_rare, Binarize, Branching, Prune, TokenCounts, Tree, TreeIter, TreeWriter};

fn main() {
    let matches = build().get_matches();

    // both arguments carry defaults
    let top_label = matches.value_of(TOP_LABEL).unwrap();
    let branching = Branching::try_from_str(matches.value_of(BRANCHING).unwrap())
        .or_exit("Can't read branching direction.", 1);

    let empty_tags = if matches.is_present(STRIP_EMPTY) {
        let mut tags = HashSet::new();
        tags.insert(matches.value_of(EMPTY_LABEL).unwrap().to_owned());
        Some(LabelSet::Positive(tags))
    } else {
        None
    };

    let input = Input::from(matches.value_of(INPUT).map(ToOwned::to_owned));
    let reader = BufReader::new(input.buf_read().or_exit("Can't open input reader.", 1));
    let output = Output::from(matches.value_of(OUTPUT).map(ToOwned::to_owned));
    let mut writer = TreeWriter::new(output.write().or_exit("Can't open output writer.", 1));

    if matches.is_present(MASK_RARE) {
        // masking needs corpus frequencies, read everything up front
        let mut trees: Vec<(usize, Tree)> = Vec::new();
        for tree in TreeIter::new(reader) {
            match tree {
                Ok(tree) => trees.push((trees.len() + 1, tree)),
                Err(err) => eprintln!("{}", err),
            }
        }
        if let Some(tags) = empty_tags.as_ref() {
            trees = trees
                .into_iter()
                .filter_map(|(n, tree)| match tree.prune_terminals(tags) {
                    Ok(tree) => Some((n, tree)),
                    Err(err) => {
                        eprintln!("tree {}: {}", n, err);
                        None
                    }
                })
                .collect();
        }
        let counts = TokenCounts::from_corpus(trees.iter().map(|(_, tree)| tree));
        for (n, tree) in &trees {
            match mask_rare(tree, &counts).binarize(top_label, branching) {
                Ok(tree) => writer.write_tree(&tree).or_exit("Can't write to output.", 1),
                Err(err) => eprintln!("tree {}: {}", n, err),
            }
        }
    } else {
        let mut n = 0;
        for tree in TreeIter::new(reader) {
            let tree = match tree {
                Ok(tree) => {
                    n += 1;
                    tree
                }
                Err(err) => {
                    eprintln!("{}", err);
                    continue;
                }
            };
            let tree = match empty_tags.as_ref() {
                Some(tags) => match tree.prune_terminals(tags) {
                    Ok(tree) => tree,
                    Err(err) => {
                        eprintln!("tree {}: {}", n, err);
                        continue;
                    }
                },
                None => tree,
            };
            match tree.binarize(top_label, branching) {
                Ok(tree) => writer.write_tree(&tree).or_exit("Can't write to output.", 1),
                Err(err) => eprintln!("tree {}: {}", n, err),
            }
        }
    }
}

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

static INPUT: &str = "INPUT";
static OUTPUT: &str = "OUTPUT";
static TOP_LABEL: &str = "TOP_LABEL";
static BRANCHING: &str = "BRANCHING";
static STRIP_EMPTY: &str = "STRIP_EMPTY";
static EMPTY_LABEL: &str = "EMPTY_LABEL";
static MASK_RARE: &str = "MASK_RARE";

fn build<'a, 'b>() -> App<'a, 'b> {
    App::new("coppice-binarize")
        .settings(DEFAULT_CLAP_SETTINGS)
        .version("0.1")
        .arg(
            Arg::with_name(INPUT)
                .index(1)
                .help("Input file, stdin if absent"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .index(2)
                .help("Output file, stdout if absent"),
        )
        .arg(
            Arg::with_name(TOP_LABEL)
                .long("top_label")
                .takes_value(true)
                .default_value("TOP")
                .help("Root label exempt from unary collapsing"),
        )
        .arg(
            Arg::with_name(BRANCHING)
                .long("branching")
                .takes_value(true)
                .possible_values(&["left", "right"])
                .default_value("right")
                .help("Branching direction of the cascades"),
        )
        .arg(
            Arg::with_name(STRIP_EMPTY)
                .long("strip_empty")
                .help("Remove empty-element terminals before binarizing"),
        )
        .arg(
            Arg::with_name(EMPTY_LABEL)
                .long("empty_label")
                .takes_value(true)
                .default_value("-NONE-")
                .help("Tag of empty-element terminals"),
        )
        .arg(
            Arg::with_name(MASK_RARE)
                .long("mask_rare")
                .help("Replace forms occurring less than twice with the unknown token"),
        )
}
