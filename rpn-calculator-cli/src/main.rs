use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::info;
use rpn_calculator::interpreter::{evaluate_rpn, infix_to_rpn, rpn_to_infix};

/// Evaluates the given arithmetic expression through Reverse Polish Notation
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate
    expression: String,

    /// Treat the expression as RPN instead of infix
    #[clap(short, long)]
    rpn: bool,

    /// Also print the expression as fully parenthesized infix
    #[clap(short, long)]
    infix: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let rpn = if args.rpn {
        args.expression
    } else {
        infix_to_rpn(args.expression)?
    };
    info!("RPN: {}", rpn);

    if args.infix {
        println!("{}", rpn_to_infix(rpn.clone())?);
    }
    println!("{}", evaluate_rpn(rpn)?);
    Ok(())
}
