//! transfer-planner CLI
//!
//! Rank least-cost transfer paths from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Exhaustive search, up to 3 intermediate nodes
//! transfer-planner paths --input routes.json --from A --to E --quantity 90
//!
//! # Ant-colony search with a fixed seed, JSON output
//! transfer-planner aco --input routes.json --from A --to E --quantity 90 --seed 7 --format json
//!
//! # Cheapest single-path source for every node in deficit
//! transfer-planner supply --input routes.json --balances balances.json
//!
//! # Generate a random network for testing
//! transfer-planner generate --nodes 20 --routes-per-node 4
//! ```

use log::info;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::process;
use std::str::FromStr;
use transfer_planner::core::balance::Balances;
use transfer_planner::core::carrier::Carrier;
use transfer_planner::core::node::NodeId;
use transfer_planner::core::route::{Route, RouteSet};
use transfer_planner::graph::catalog::RouteCatalog;
use transfer_planner::optimization::aco::{AcoConfig, AntColony};
use transfer_planner::optimization::exhaustive::PathFinder;
use transfer_planner::optimization::ranking::RankedPath;
use transfer_planner::optimization::supply::SupplyPlan;
use transfer_planner::simulation::network::{generate_random_network, NetworkConfig};

fn print_usage() {
    eprintln!(
        r#"transfer-planner — least-cost multi-hop transfer search

USAGE:
    transfer-planner <COMMAND> [OPTIONS]

COMMANDS:
    paths       Exhaustive search over every simple path within a hop bound
    aco         Ant-colony search (for networks too large to enumerate)
    supply      Cheapest single-path source for every node in deficit
    generate    Generate a random route network (for testing)
    help        Show this message

OPTIONS (paths, aco):
    --input <FILE>        Path to JSON routes file
    --from <NODE>         Origin node
    --to <NODE>           Destination node
    --quantity <AMOUNT>   Quantity to move
    --top <N>             Number of results (default: 5)
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (paths, supply):
    --hops <N>            Maximum intermediate nodes (default: 3)

OPTIONS (aco):
    --agents <N>          Agents per iteration (default: 10)
    --iterations <N>      Iterations (default: 50)
    --alpha <X>           Pheromone weight (default: 1.0)
    --beta <X>            Inverse-cost weight (default: 2.0)
    --evaporation <X>     Evaporation rate in [0, 1) (default: 0.1)
    --deposit <X>         Deposit constant (default: 100)
    --seed <N>            Seed for reproducible runs

OPTIONS (supply):
    --input <FILE>        Path to JSON routes file
    --balances <FILE>     Path to JSON balances file
    --top <N>             Options per deficit (default: 3)
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (generate):
    --nodes <N>           Number of nodes (default: 10)
    --routes-per-node <N> Outgoing routes per node (default: 3)
    --seed <N>            Seed for reproducible output
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    transfer-planner paths --input routes.json --from A --to E --quantity 90 --hops 1
    transfer-planner aco --input routes.json --from A --to E --quantity 90 --agents 20
    transfer-planner supply --input routes.json --balances balances.json --hops 2
    transfer-planner generate --nodes 50 --routes-per-node 5 --output net.json"#
    );
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// JSON schema for input routes.
#[derive(serde::Deserialize, serde::Serialize)]
struct RouteInput {
    from: String,
    to: String,
    #[serde(default = "default_carrier")]
    carrier: String,
    capacity: String,
    cost: String,
}

fn default_carrier() -> String {
    "default".to_string()
}

#[derive(serde::Deserialize, serde::Serialize)]
struct RoutesFile {
    routes: Vec<RouteInput>,
}

#[derive(serde::Deserialize)]
struct BalancesFile {
    balances: HashMap<String, String>,
}

/// JSON output schema for one ranked path.
#[derive(serde::Serialize)]
struct PathOutput {
    rank: usize,
    path: Vec<String>,
    carriers: Vec<String>,
    bottleneck_capacity: String,
    repetitions: String,
    total_delivered: String,
    total_cost: String,
    unit_cost: String,
}

impl PathOutput {
    fn new(rank: usize, ranked: &RankedPath) -> Self {
        Self {
            rank,
            path: ranked.path.iter().map(|n| n.to_string()).collect(),
            carriers: ranked.routes.iter().map(|r| r.carrier().to_string()).collect(),
            bottleneck_capacity: ranked.bottleneck_capacity.to_string(),
            repetitions: ranked.repetitions.to_string(),
            total_delivered: ranked.total_delivered.to_string(),
            total_cost: ranked.total_cost.to_string(),
            unit_cost: ranked.unit_cost.round_dp(6).to_string(),
        }
    }
}

/// `--flag value` pairs of one command.
struct Options(HashMap<String, String>);

impl Options {
    fn parse(args: &[String], known: &[&str]) -> Self {
        let mut map = HashMap::new();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if !known.contains(&flag) {
                fail(format!("unknown option: {}", flag));
            }
            i += 1;
            let value = args
                .get(i)
                .cloned()
                .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
            map.insert(flag.trim_start_matches("--").to_string(), value);
            i += 1;
        }
        Self(map)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn required(&self, name: &str) -> &str {
        self.get(name)
            .unwrap_or_else(|| fail(format!("--{} is required", name)))
    }

    fn parsed<T: FromStr>(&self, name: &str, default: T) -> T
    where
        T::Err: Display,
    {
        match self.get(name) {
            Some(raw) => raw
                .parse()
                .unwrap_or_else(|e| fail(format!("invalid --{} '{}': {}", name, raw, e))),
            None => default,
        }
    }
}

fn parse_decimal(field: &str, raw: &str) -> Decimal {
    raw.parse()
        .unwrap_or_else(|e| fail(format!("invalid {} '{}': {}", field, raw, e)))
}

fn load_routes(path: &str) -> RouteSet {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    let file: RoutesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "routes": [
    {{ "from": "A", "to": "C", "carrier": "T1", "capacity": "50", "cost": "500" }}
  ]
}}"#
        );
        fail(format!("parsing JSON: {}", e))
    });

    let mut set = RouteSet::new();
    for input in file.routes {
        let route = Route::new(
            NodeId::new(&input.from),
            NodeId::new(&input.to),
            Carrier::new(&input.carrier),
            parse_decimal("capacity", &input.capacity),
            parse_decimal("cost", &input.cost),
        )
        .unwrap_or_else(|e| fail(e));
        set.add(route);
    }
    info!("loaded {} routes from {}", set.len(), path);
    set
}

fn load_balances(path: &str) -> Balances {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
    let file: BalancesFile = serde_json::from_str(&content)
        .unwrap_or_else(|e| fail(format!("parsing JSON: {}", e)));
    file.balances
        .iter()
        .map(|(node, raw)| (NodeId::new(node), parse_decimal("balance", raw)))
        .collect()
}

fn print_ranked(ranked: &[RankedPath], format: &str) {
    if format == "json" {
        let output: Vec<PathOutput> = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| PathOutput::new(i + 1, r))
            .collect();
        let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| fail(e));
        println!("{}", json);
    } else if ranked.is_empty() {
        println!("No path found.");
    } else {
        for (i, r) in ranked.iter().enumerate() {
            println!("{:>3}. {}", i + 1, r);
        }
    }
}

fn cmd_paths(args: &[String]) {
    let opts = Options::parse(
        args,
        &["--input", "--from", "--to", "--quantity", "--hops", "--top", "--format"],
    );
    let catalog = RouteCatalog::new(load_routes(opts.required("input")));
    let origin = NodeId::new(opts.required("from"));
    let destination = NodeId::new(opts.required("to"));
    let quantity = parse_decimal("quantity", opts.required("quantity"));

    let ranked = PathFinder::new(&catalog)
        .find_best_paths(
            &origin,
            &destination,
            quantity,
            opts.parsed("hops", 3usize),
            opts.parsed("top", 5usize),
        )
        .unwrap_or_else(|e| fail(e));
    print_ranked(&ranked, opts.get("format").unwrap_or("text"));
}

fn cmd_aco(args: &[String]) {
    let opts = Options::parse(
        args,
        &[
            "--input",
            "--from",
            "--to",
            "--quantity",
            "--top",
            "--format",
            "--agents",
            "--iterations",
            "--alpha",
            "--beta",
            "--evaporation",
            "--deposit",
            "--seed",
        ],
    );
    let catalog = RouteCatalog::new(load_routes(opts.required("input")));
    let origin = NodeId::new(opts.required("from"));
    let destination = NodeId::new(opts.required("to"));
    let quantity = parse_decimal("quantity", opts.required("quantity"));

    let defaults = AcoConfig::default();
    let config = AcoConfig {
        agents: opts.parsed("agents", defaults.agents),
        iterations: opts.parsed("iterations", defaults.iterations),
        alpha: opts.parsed("alpha", defaults.alpha),
        beta: opts.parsed("beta", defaults.beta),
        evaporation_rate: opts.parsed("evaporation", defaults.evaporation_rate),
        deposit_constant: opts.parsed("deposit", defaults.deposit_constant),
        top_n: opts.parsed("top", defaults.top_n),
        seed: opts.get("seed").map(|_| opts.parsed("seed", 0u64)),
        ..defaults
    };

    let ranked = AntColony::new(&catalog, config)
        .and_then(|colony| colony.search(&origin, &destination, quantity))
        .unwrap_or_else(|e| fail(e));
    print_ranked(&ranked, opts.get("format").unwrap_or("text"));
}

fn cmd_supply(args: &[String]) {
    let opts = Options::parse(args, &["--input", "--balances", "--hops", "--top", "--format"]);
    let catalog = RouteCatalog::new(load_routes(opts.required("input")));
    let balances = load_balances(opts.required("balances"));
    if !balances.is_balanced() {
        info!("balances do not sum to zero; planning deficits anyway");
    }

    let plan = SupplyPlan::build(
        &catalog,
        &balances,
        opts.parsed("hops", 3usize),
        opts.parsed("top", 3usize),
    )
    .unwrap_or_else(|e| fail(e));

    if opts.get("format") == Some("json") {
        let json = serde_json::to_string_pretty(&plan).unwrap_or_else(|e| fail(e));
        println!("{}", json);
    } else {
        println!("{}", plan);
    }
}

fn cmd_generate(args: &[String]) {
    let opts = Options::parse(args, &["--nodes", "--routes-per-node", "--seed", "--output"]);
    let config = NetworkConfig {
        node_count: opts.parsed("nodes", 10usize),
        routes_per_node: opts.parsed("routes-per-node", 3usize),
        seed: opts.get("seed").map(|_| opts.parsed("seed", 0u64)),
        ..Default::default()
    };

    let set = generate_random_network(&config);
    let output = RoutesFile {
        routes: set
            .routes()
            .iter()
            .map(|r| RouteInput {
                from: r.origin().to_string(),
                to: r.destination().to_string(),
                carrier: r.carrier().to_string(),
                capacity: r.capacity().to_string(),
                cost: r.cost().to_string(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| fail(e));

    if let Some(path) = opts.get("output") {
        fs::write(path, &json).unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} routes across {} nodes → {}",
            set.len(),
            config.node_count,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "paths" => cmd_paths(rest),
        "aco" => cmd_aco(rest),
        "supply" => cmd_supply(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
