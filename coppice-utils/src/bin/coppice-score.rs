use std::io::BufReader;

use clap::{App, AppSettings, Arg};
use stdinout::{Input, OrExit};

use coppice::{score_corpus, Tree, TreeIter};

fn main() {
    let matches = build().get_matches();

    // both arguments are required
    let hypotheses = read_corpus(
        matches.value_of(HYPOTHESIS).unwrap(),
        "Can't read hypothesis treebank.",
    );
    let gold = read_corpus(matches.value_of(GOLD).unwrap(), "Can't read gold treebank.");

    let evaluation = score_corpus(&hypotheses, &gold).or_exit("Can't score treebanks.", 1);
    for (idx, err) in evaluation.flagged() {
        eprintln!("pair {} not scored: {}", idx + 1, err);
    }

    let score = evaluation.score();
    println!("matched brackets: {}", score.matched());
    println!("hypothesis brackets: {}", score.hypothesis());
    println!("gold brackets: {}", score.gold());
    println!("precision: {:.4}", score.precision());
    println!("recall: {:.4}", score.recall());
    println!("f1: {:.4}", score.f1());
}

// Scoring pairs trees by position, a skipped line would misalign the corpora. Read strictly.
fn read_corpus(path: &str, description: &str) -> Vec<Tree> {
    let input = Input::from(Some(path));
    let reader = BufReader::new(input.buf_read().or_exit("Can't open input reader.", 1));
    TreeIter::new(reader)
        .collect::<Result<Vec<_>, _>>()
        .or_exit(description, 1)
}

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

static HYPOTHESIS: &str = "HYPOTHESIS";
static GOLD: &str = "GOLD";

fn build<'a, 'b>() -> App<'a, 'b> {
    App::new("coppice-score")
        .settings(DEFAULT_CLAP_SETTINGS)
        .version("0.1")
        .arg(
            Arg::with_name(HYPOTHESIS)
                .index(1)
                .required(true)
                .help("Hypothesis treebank"),
        )
        .arg(
            Arg::with_name(GOLD)
                .index(2)
                .required(true)
                .help("Gold treebank"),
        )
}
