use bit_network::network::Network;
use bit_network::ops::{Permute, Word};
use bit_network::permutation::Permutation;
use bit_network::internal;

use std::time::Instant;
use std::{env, process};

use getopts::Options;
use rand::distributions::{Distribution, Standard};

//-----------------------------------------------------------------------------

fn main() {
    let config = Config::new();

    match config.width {
        8 => run::<u8>(&config),
        16 => run::<u16>(&config),
        32 => run::<u32>(&config),
        64 => run::<u64>(&config),
        128 => run::<u128>(&config),
        _ => unreachable!(),
    }
}

//-----------------------------------------------------------------------------

pub struct Config {
    pub width: usize,
    pub permutations: usize,
    pub words: usize,
}

impl Config {
    const WIDTH: usize = 64;
    const PERMUTATIONS: usize = 1000;
    const WORDS: usize = 10_000;

    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optopt("w", "width", "word width in bits: 8, 16, 32, 64, or 128 (default 64)", "INT");
        opts.optopt("p", "permutations", "number of random permutations (default 1000)", "INT");
        opts.optopt("n", "words", "number of words per permutation (default 10000)", "INT");
        opts.optflag("h", "help", "print this help");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f.to_string());
                process::exit(1);
            }
        };

        let mut config = Config {
            width: Self::WIDTH,
            permutations: Self::PERMUTATIONS,
            words: Self::WORDS,
        };
        if matches.opt_present("h") {
            let header = format!("Usage: {} [options]", program);
            print!("{}", opts.usage(&header));
            process::exit(0);
        }
        if let Some(s) = matches.opt_str("w") {
            match s.parse::<usize>() {
                Ok(n) => {
                    if ![8, 16, 32, 64, 128].contains(&n) {
                        eprintln!("Invalid word width: {}", n);
                        process::exit(1);
                    }
                    config.width = n;
                },
                Err(f) => {
                    eprintln!("--width: {}", f.to_string());
                    process::exit(1);
                },
            }
        }
        if let Some(s) = matches.opt_str("p") {
            config.permutations = Self::parse_count(&s, "--permutations");
        }
        if let Some(s) = matches.opt_str("n") {
            config.words = Self::parse_count(&s, "--words");
        }

        config
    }

    fn parse_count(s: &str, option: &str) -> usize {
        match s.parse::<usize>() {
            Ok(n) => {
                if n == 0 {
                    eprintln!("{}: the count must be positive", option);
                    process::exit(1);
                }
                n
            },
            Err(f) => {
                eprintln!("{}: {}", option, f.to_string());
                process::exit(1);
            },
        }
    }
}

//-----------------------------------------------------------------------------

fn run<W>(config: &Config)
where
    W: Word,
    Standard: Distribution<W>,
{
    println!("Generating {} random permutations of width {}", config.permutations, W::BITS);
    let permutations = internal::random_permutations(config.permutations, W::BITS);
    println!("Generating {} random words", config.words);
    let words: Vec<W> = internal::random_words(config.words);
    println!("");

    let networks = build_networks::<W>(&permutations);
    let swaps: usize = networks.iter().map(|network| network.swap_count()).sum();
    println!("Average:  {:.3} masked swaps / permutation", (swaps as f64) / (networks.len() as f64));
    println!("");

    let truth = apply("Bit-by-bit permutation", &permutations, &words);
    let result = apply("Permutation network", &networks, &words);
    if result != truth {
        eprintln!("Permutation networks and bit-by-bit permutations disagree");
        process::exit(1);
    }
}

fn build_networks<W: Word>(permutations: &[Permutation]) -> Vec<Network<W>> {
    println!("Building {} networks", permutations.len());
    let now = Instant::now();
    let mut result: Vec<Network<W>> = Vec::with_capacity(permutations.len());
    let mut checksum: u64 = 0;
    for permutation in permutations.iter() {
        let network = Network::<W>::new(permutation).unwrap();
        checksum ^= network.swap_count() as u64;
        result.push(network);
    }
    internal::report_results(permutations.len(), checksum, now.elapsed());
    result
}

// Applies every permuter to every word and returns the xor of the results for each permuter.
fn apply<W: Word, P: Permute<W>>(name: &str, permuters: &[P], words: &[W]) -> Vec<W> {
    println!("{} with {} x {} words", name, permuters.len(), words.len());
    let now = Instant::now();
    let mut result: Vec<W> = Vec::with_capacity(permuters.len());
    for permuter in permuters.iter() {
        let mut total = W::zero();
        for word in words.iter() {
            total = total ^ permuter.permute(*word);
        }
        result.push(total);
    }
    let checksum: u64 = result.iter().map(|value| value.count_ones() as u64).sum();
    internal::report_results(permuters.len() * words.len(), checksum, now.elapsed());
    result
}

//-----------------------------------------------------------------------------
