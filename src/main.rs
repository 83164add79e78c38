use clap::{Parser, ValueEnum};
use fframe::{
    Node, Value,
    backend::selection,
    config::{BackendPreference, Config},
    lift,
    node::{lift::Literal, operator::SumParams},
};
#[cfg(feature = "vectorized")]
use fframe::value::array::NdArray;
use log::debug;

/// fframe evaluates small built-in expression trees over the values given
/// on the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend to evaluate with. Defaults to the `FFRAME_BACKEND`
    /// environment variable, then to `auto`.
    #[arg(short, long)]
    backend: Option<BackendPreference>,

    /// Prints the tree before evaluating it and enables debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// The tree to evaluate. `x` stands for the call arguments.
    demo: Demo,

    /// Call arguments: `true`, `false`, integers, reals, or comma-separated
    /// arrays such as `1,2.5,3`.
    #[arg(value_parser = parse_value, allow_negative_numbers = true)]
    values: Vec<Value>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Demo {
    /// clip(x[0] + x[1] * x[2], 0, 1)
    Clip,
    /// x[1] <= x[0] < x[2]
    InBetween,
    /// sin(x) ** 2 + cos(x) ** 2
    Wave,
    /// sqrt(sum(x * x)), for one array argument
    Norm,
    /// {"first": x[0], "rest": [x[1], x[2]]}
    Pack,
}

impl Demo {
    fn tree(self) -> Node {
        let x = Node::identity();
        match self {
            Self::Clip => (x.at(0) + x.at(1) * x.at(2)).clip(0, 1),
            Self::InBetween => x.at(0).in_between(x.at(1), x.at(2)),
            Self::Wave => x.sin().pow(2) + x.cos().pow(2),
            Self::Norm => (&x * &x).sum(SumParams::default()).sqrt(),
            Self::Pack => {
                lift(Literal::map([(Literal::from("first"), Literal::from(x.at(0))),
                                   (Literal::from("rest"),
                                    Literal::from(vec![x.at(1), x.at(2)]))]))
            },
        }
    }
}

/// Parses one command-line literal.
fn parse_value(raw: &str) -> Result<Value, String> {
    if raw.contains(',') {
        let items = raw.split(',')
                       .map(|item| parse_scalar(item.trim()))
                       .collect::<Result<Vec<_>, _>>()?;
        return Ok(sequence(items));
    }
    parse_scalar(raw.trim())
}

/// A comma-separated argument is an array when the build has one.
#[cfg(feature = "vectorized")]
fn sequence(items: Vec<Value>) -> Value {
    let list = Value::list(items);
    NdArray::from_value(&list).map_or(list, NdArray::into_value)
}

#[cfg(not(feature = "vectorized"))]
fn sequence(items: Vec<Value>) -> Value {
    Value::list(items)
}

fn parse_scalar(raw: &str) -> Result<Value, String> {
    match raw {
        "" => Err("empty value".to_string()),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => raw.parse::<i64>()
                .map(Value::Integer)
                .or_else(|_| raw.parse::<f64>().map(Value::Real))
                .map_err(|_| format!("'{raw}' is not a boolean, integer or real")),
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Some(preference) = args.backend {
        let config = Config { backend: preference };
        if let Err(current) = selection::install(config.resolve()) {
            debug!("Keeping the {current} backend.");
        }
    }

    let tree = args.demo.tree();
    if args.verbose {
        println!("{tree}");
    }
    debug!("Evaluating {} nodes with {} arguments.", tree.size(), args.values.len());

    match tree.call(&args.values) {
        Ok(result) => println!("{result}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
