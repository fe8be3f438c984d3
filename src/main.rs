use clap::Parser;
use inkwell::cli::Cli;
use inkwell::config::EnvFile;
use inkwell::{Settings, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env_file = EnvFile::load();
    let settings = Settings::load().map_err(|e| env_file.explain(e))?;
    let worker_threads = settings.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, settings, env_file))
}
