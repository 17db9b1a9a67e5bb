use clap::{ArgAction, Parser};
use epd2pm::config::DEFAULT_CONFIG_PATH;
use epd2pm::{ConvertConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// epd2pm - 将EPUB的OPF文件转换为出版物清单(Publication Manifest)
#[derive(Parser)]
#[command(name = "epd2pm")]
#[command(about = "Convert an EPUB OPF file into a Publication Manifest")]
#[command(version, disable_version_flag = true)]
struct Args {
    /// 输入文件
    #[arg(value_name = "FNAME", help = "输入文件(.opf、.xml、.epub或.json)")]
    fname: Option<PathBuf>,

    /// 输出文件
    #[arg(short, long, value_name = "FNAME", help = "输出文件名，缺省时使用标准输出")]
    output: Option<PathBuf>,

    /// 跟踪模式
    #[arg(short, long, help = "把解析后的包文档输出到标准错误")]
    trace: bool,

    /// 配置文件
    #[arg(short, long, value_name = "PATH", help = "YAML配置文件路径")]
    config: Option<PathBuf>,

    /// 生成默认配置
    #[arg(long, help = "在当前目录生成默认配置文件epd2pm.yaml后退出")]
    init_config: bool,

    /// 日志级别
    #[arg(long, value_name = "FILTER", help = "日志过滤指令，如debug或epd2pm=trace")]
    log_level: Option<String>,

    #[allow(dead_code)]
    #[arg(short = 'v', long, action = ArgAction::Version, help = "显示版本号")]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.init_config {
        return match ConvertConfig::generate_default_config(DEFAULT_CONFIG_PATH) {
            Ok(()) => {
                println!("已生成配置文件: {}", DEFAULT_CONFIG_PATH);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ 错误: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match ConvertConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));

    let Some(fname) = args.fname.as_deref() else {
        eprintln!("No file name has been provided; exiting");
        eprintln!("Use --help for usage information");
        return ExitCode::FAILURE;
    };

    match process_file(fname, &args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// 初始化日志，日志写到标准错误以免混入JSON输出
fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn process_file(fname: &Path, args: &Args, config: &ConvertConfig) -> Result<()> {
    let document = epd2pm::load_package(fname)?;

    if args.trace || config.trace {
        eprintln!("{}", document.to_json()?);
    }

    let manifest = epd2pm::convert(&document);
    let output = manifest.to_json_string(config.indent)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(path = %path.display(), "已写入出版物清单");
        }
        None => println!("{}", output),
    }

    Ok(())
}
