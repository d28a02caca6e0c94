use std::io::BufReader;

use clap::{App, AppSettings, Arg};
use stdinout::{Input, OrExit, Output};

use coppice::{Debinarize, TreeIter, TreeWriter};

fn main() {
    let matches = build().get_matches();

    let input = Input::from(matches.value_of(INPUT).map(ToOwned::to_owned));
    let reader = BufReader::new(input.buf_read().or_exit("Can't open input reader.", 1));
    let output = Output::from(matches.value_of(OUTPUT).map(ToOwned::to_owned));
    let mut writer = TreeWriter::new(output.write().or_exit("Can't open output writer.", 1));

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
        match tree.debinarize() {
            Ok(tree) => writer.write_tree(&tree).or_exit("Can't write to output.", 1),
            Err(err) => eprintln!("tree {}: {}", n, err),
        }
    }
}

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

static INPUT: &str = "INPUT";
static OUTPUT: &str = "OUTPUT";

fn build<'a, 'b>() -> App<'a, 'b> {
    App::new("coppice-debinarize")
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
}
