use clap::{Arg, ArgAction, Command, value_parser};

pub const PROFILE_CMD: &str = "profile";

pub fn create_profile_cli() -> Command {
    Command::new(PROFILE_CMD)
        .about("Bin reads into wiggles and score local QC windows per chromosome")
        .arg_required_else_help(true)
        .arg(
            Arg::new("bed")
                .value_name("BED")
                .required(true)
                .help("Alignment file in the BED format. May be gzip-compressed."),
        )
        .arg(
            Arg::new("table")
                .value_name("TABLE")
                .required(true)
                .help("Intensities of the random samplings per window. May be gzip-compressed."),
        )
        .arg(
            Arg::new("chromsizes")
                .value_name("CHROMSIZES")
                .required(true)
                .help("Tab-separated chromosome sizes of the genome assembly."),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .required(true)
                .help("Output directory"),
        )
        .arg(
            Arg::new("span")
                .short('s')
                .long("span")
                .value_name("INT")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("50")
                .help("Span/resolution in bp for wiggles"),
        )
        .arg(
            Arg::new("ext")
                .short('e')
                .long("ext")
                .value_name("INT")
                .value_parser(value_parser!(u32))
                .default_value("150")
                .help("Read extension in bp"),
        )
        .arg(
            Arg::new("bg")
                .long("bg")
                .value_name("INT")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true)
                .default_value("0")
                .help("Global background threshold for local QCs"),
        )
        .arg(
            Arg::new("five-replicates")
                .short('5')
                .long("five-replicates")
                .action(ArgAction::SetTrue)
                .help("Switch to '5-replicates' mode. TABLE is expected to contain 19 columns."),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .action(ArgAction::SetTrue)
                .help("Skip reads/bins on unknown chromosomes instead of stopping the program."),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not display progress messages."),
        )
}
