use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::tools::{ToolContext, ToolRegistry};
use serde_json::{Value, json};

/// Handle `tool <NAME> --args JSON`: print the tool's status text as-is.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tool { name, args } = cmd {
        let registry = ToolRegistry::with_defaults();
        let ctx = ToolContext::new(cfg.clone(), cfg.work_dir());

        let out = match serde_json::from_str::<Value>(args) {
            Ok(v) => registry.execute(&ctx, name, &v),
            Err(e) => format!("Invalid arguments for {name}: {e}"),
        };
        println!("{out}");
    }
    Ok(())
}

/// Handle `tools`: names, descriptions and schemas as JSON.
pub fn list() -> AppResult<()> {
    let defs: Vec<Value> = ToolRegistry::with_defaults()
        .definitions()
        .into_iter()
        .map(|d| {
            json!({
                "name": d.name,
                "description": d.description,
                "parameters": d.parameters,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&defs)?);
    Ok(())
}
