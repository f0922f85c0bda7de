//! hello-bindings CLI
//!
//! Lists, calls and demonstrates the example module from the command line.

#![allow(clippy::uninlined_format_args, clippy::needless_pass_by_value)]

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use hello_bindings::prelude::*;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "hello-bindings")]
#[command(version = hello_bindings::VERSION)]
#[command(about = "Example bindings: functions, classes and numeric buffers", long_about = None)]
struct Cli {
    /// JSON module configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print every function signature and module attribute
    List,

    /// Call a function; arguments are parsed as int, float, bool, None or str
    Call {
        /// Function name
        name: String,
        /// Positional arguments
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
        /// Keyword argument as name=value (repeatable)
        #[arg(long = "kw", value_name = "NAME=VALUE")]
        kwargs: Vec<String>,
    },

    /// Run the scripted walkthrough of every demo
    Demo,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match ModuleConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => ModuleConfig::default(),
    };
    let module = hello_module(config);

    let result = match cli.command {
        Commands::List => {
            cmd_list(&module);
            Ok(())
        }
        Commands::Call { name, args, kwargs } => cmd_call(&module, &name, args, kwargs),
        Commands::Demo => cmd_demo(&module),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn cmd_list(module: &Module) {
    println!("module {}: {}", module.name(), module.doc());
    println!();
    for name in module.function_names() {
        if let Ok(overloads) = module.overloads(name) {
            for overload in overloads {
                println!("{}{}", name, overload.signature());
                if !overload.doc_str().is_empty() {
                    println!("    {}", overload.doc_str());
                }
            }
        }
    }
    println!();
    for (name, value) in module.attrs() {
        println!("{} = {}", name, value);
    }
}

#[cfg(feature = "cli")]
fn cmd_call(module: &Module, name: &str, args: Vec<String>, kwargs: Vec<String>) -> Result<(), BindingError> {
    let args: Vec<Value> = args.iter().map(|a| Value::parse_literal(a)).collect();
    let kwargs = kwargs
        .iter()
        .map(|kv| match kv.split_once('=') {
            Some((k, v)) => Ok((k.to_string(), Value::parse_literal(v))),
            None => Err(BindingError::InvalidArgument(format!(
                "keyword argument `{}` must be NAME=VALUE",
                kv
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let result = module.call_kw(name, args, kwargs)?;
    println!("{}", result);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_demo(module: &Module) -> Result<(), BindingError> {
    println!("Functions");
    println!("add(1, 3) = {}", module.call("add", vec![Value::Int(1), Value::Int(3)])?);
    println!("the_answer = {}", module.attr("the_answer")?);
    println!("what = {}", module.attr("what")?);
    println!("mult() = {}", module.call("mult", vec![])?);
    println!("mult(2, 3) = {}", module.call("mult", vec![Value::Int(2), Value::Int(3)])?);
    println!("mult(2.0, 3) = {}", module.call("mult", vec![Value::Float(2.0), Value::Int(3)])?);

    println!();
    println!("OOP");
    let mut p = Pet::new("Jamy");
    println!("{}", p.get_name());
    p.set_name("Jo");
    println!("{}", p.get_name());
    p.name = "Josy".to_string();
    println!("{}", p);

    let mut p2 = Pet2::new("Jose");
    p2.set_attr("random_att_name", "hey")?;
    let attrs: Vec<String> = p2.attrs().map(|(k, v)| format!("{}: {}", k, v)).collect();
    println!("{} {{{}}}", p2.name(), attrs.join(", "));

    let dog = Dog::default();
    println!("{} says {}", dog.get_name(), dog.bark());
    println!("pet_store() = {}", pet_store());
    let pet = pet_store2();
    if let Some(b) = pet.as_bark() {
        println!("pet_store2() is a {} and says {}", pet.type_name(), b.bark());
    }

    let mut overlord = Overlord::default();
    println!("{} is {}", overlord.name(), overlord.age());
    overlord.set(2000);
    overlord.set("Sauron");
    println!("{} is {}", overlord.name(), overlord.age());

    let mut bird = Bird::new("Scrooge", BirdKind::Goose);
    bird.attr.age = 3.0;
    println!("{} ({}, value {}) aged {}", bird.name, bird.kind, bird.kind.value(), bird.attr.age);
    println!("PrivateCtor::create(7).i = {}", PrivateCtor::create(7).i());
    println!("create_pub(3.9).i = {}", create_pub(3.9).i);

    println!();
    println!("Linear algebra");
    let m = HostArray::from_shape_vec(&[3, 3], (0..9).map(f64::from).collect())?;
    println!(
        "eig_add_mat3d(m, m) = {}",
        module.call("eig_add_mat3d", vec![Value::Array(m.clone()), Value::Array(m)])?
    );

    let v = HostArray::from_shape_vec(&[3], vec![1.0_f32, 2.0, 3.0])?;
    module.call("eig_inplace_multiply_f", vec![Value::Array(v.clone()), Value::Float(2.0)])?;
    println!("after eig_inplace_multiply_f(v, 2) v = {}", v);
    match module.call("eig_inplace_multiply_f", vec![Value::Array(v.readonly_view()), Value::Float(2.0)]) {
        Err(e) => println!("read-only view refused: {}", e),
        Ok(_) => println!("read-only view accepted"),
    }
    let wrong = HostArray::from_shape_vec(&[3], vec![1.0_f64, 2.0, 3.0])?;
    match module.call("eig_inplace_multiply_f", vec![Value::Array(wrong), Value::Float(2.0)]) {
        Err(e) => println!("float64 vector refused: {}", e),
        Ok(_) => println!("float64 vector accepted"),
    }

    let holder = MatrixHolder::new(2, 3);
    let view = holder.get_matrix()?;
    view.fill(1.5_f64)?;
    let copy = holder.copy_matrix()?;
    let cview = holder.view_matrix()?;
    for (label, a) in [("get_matrix", &view), ("view_matrix", &cview), ("copy_matrix", &copy)] {
        println!(
            "{}: owns data = {}, writable = {}",
            label,
            a.owns_data(),
            a.is_writable()
        );
    }
    if let Err(e) = cview.set(&[0, 0], 0.0_f64) {
        println!("write through view_matrix refused: {}", e);
    }
    Ok(())
}
