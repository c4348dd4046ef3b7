use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "ddt", about = "Compute the difference distribution table of an S-box.")]
pub struct DdtOptions {
    #[structopt(short = "s", long = "settings", default_value = "settings.toml", parse(from_os_str))]
    /**
    Path of the TOML settings file describing the run.
    */
    pub settings: PathBuf,

    #[structopt(short = "i", long = "input", parse(from_os_str))]
    /**
    Overrides the input file of the settings. The file holds one output vector per line, the
    i'th line being the image of the input with integer encoding i.
    */
    pub input: Option<PathBuf>,

    #[structopt(short = "o", long = "output", parse(from_os_str))]
    /**
    Overrides the file the table is written to.
    */
    pub output: Option<PathBuf>,

    #[structopt(short = "t", long = "threads")]
    /**
    Overrides the number of threads used by the parallel algorithm.
    */
    pub threads: Option<usize>,

    #[structopt(short = "v", long = "verbose")]
    /**
    Also log debug messages.
    */
    pub verbose: bool,
}

#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "generate", about = "Write a random bijective S-box to a file.")]
pub struct GenerateOptions {
    #[structopt(short = "n", long = "variables", help = "Number of variables of the S-box.")]
    pub variables: usize,

    #[structopt(short = "o", long = "output", parse(from_os_str), help = "File to write the S-box to.")]
    pub output: PathBuf,

    #[structopt(short = "s", long = "seed", help = "Seed for a reproducible S-box.")]
    pub seed: Option<u64>,
}
