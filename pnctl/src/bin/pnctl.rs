use clap::{
    Parser,
    Subcommand,
};
use pncore::{
    device::{
        CloudMessageType,
        GcmDeviceForm,
        traits::GcmDeviceBackend,
    },
    hexdecimal::{
        Decimal,
        decimal_to_hex,
        hex_to_decimal,
    },
    platform::{
        ConnectorOption,
        DevicePlatform,
        PlatformConnector,
    },
};
use pndb_sqlite::SqliteBackend;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "PN_DB_URL", env = "PN_DB_URL")]
    pn_db_url: Option<String>,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    Device {
        #[command(subcommand)]
        cmd: DeviceCmd,
    },
    #[command(arg_required_else_help = true)]
    Convert {
        #[command(subcommand)]
        cmd: ConvertCmd,
    },
}

#[derive(Debug, Subcommand)]
enum DeviceCmd {
    /// Register a device
    #[command(arg_required_else_help = true)]
    Add {
        registration_id: String,
        #[clap(long)]
        device_id: Option<String>,
        #[clap(long)]
        name: Option<String>,
        #[clap(long, value_enum, default_value_t)]
        cloud_message_type: CloudMessageType,
        #[clap(long)]
        application_id: Option<String>,
        #[clap(long)]
        user_id: Option<i64>,
    },
    #[command(arg_required_else_help = true)]
    Get {
        id: i64,
    },
    /// Find the devices with the hexadecimal device id
    #[command(arg_required_else_help = true)]
    Find {
        device_id: String,
    },
    List,
    #[command(arg_required_else_help = true)]
    Activate {
        id: i64,
    },
    #[command(arg_required_else_help = true)]
    Deactivate {
        id: i64,
    },
    /// Set the device id; omit to clear it
    #[command(arg_required_else_help = true)]
    SetDeviceId {
        id: i64,
        device_id: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Remove {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ConvertCmd {
    /// Hexadecimal to the stored decimal form
    #[command(arg_required_else_help = true)]
    ToDecimal {
        value: String,
    },
    /// Stored decimal form to hexadecimal
    #[command(arg_required_else_help = true)]
    ToHex {
        value: Decimal,
    },
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("pncore")
        .module("pndb_sqlite")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    match args.command {
        Commands::Device { cmd } => {
            let url = args.pn_db_url
                .ok_or_else(|| anyhow::anyhow!("PN_DB_URL must be provided"))?;
            let platform = SqliteBackend::devices(
                ConnectorOption::from(url)
                    .auto_create_db(true)
            )
                .await
                .map_err(anyhow::Error::from_boxed)?;
            parse_device(&platform, cmd).await?;
        },
        Commands::Convert { cmd } => {
            parse_convert(cmd)?;
        },
    }

    Ok(())
}

async fn parse_device<'p>(
    platform: &'p impl DevicePlatform,
    arg: DeviceCmd,
) -> anyhow::Result<()> {
    match arg {
        DeviceCmd::Add {
            registration_id,
            device_id,
            name,
            cloud_message_type,
            application_id,
            user_id,
        } => {
            let form = GcmDeviceForm {
                name,
                active: Some(true),
                user_id,
                device_id,
                registration_id: Some(registration_id),
                cloud_message_type: Some(cloud_message_type.to_string()),
                application_id,
            };
            let device = platform.register_gcm_device(&form).await?;
            println!("registered device {}", device.id);
        }
        DeviceCmd::Get { id } => {
            let device = platform.get_gcm_device(id).await?;
            println!("{}", serde_json::to_string_pretty(&device)?);
        }
        DeviceCmd::Find { device_id } => {
            let devices = platform.list_gcm_devices_by_device_id(&device_id).await?;
            println!("{}", serde_json::to_string_pretty(&devices)?);
        }
        DeviceCmd::List => {
            let devices = platform.list_gcm_devices().await?;
            for device in devices.iter() {
                println!(
                    "{}\t{}\t{}\t{}",
                    device.id,
                    device.device_id.as_deref().unwrap_or("-"),
                    if device.active { "active" } else { "inactive" },
                    device.registration_id,
                );
            }
        }
        DeviceCmd::Activate { id } => {
            report(id, platform.set_gcm_device_active(id, true).await?);
        }
        DeviceCmd::Deactivate { id } => {
            report(id, platform.set_gcm_device_active(id, false).await?);
        }
        DeviceCmd::SetDeviceId { id, device_id } => {
            report(id, platform.change_gcm_device_id(id, device_id.as_deref()).await?);
        }
        DeviceCmd::Remove { id } => {
            report(id, platform.delete_gcm_device(id).await?);
        }
    }
    Ok(())
}

fn parse_convert(arg: ConvertCmd) -> anyhow::Result<()> {
    match arg {
        ConvertCmd::ToDecimal { value } => {
            println!("{}", hex_to_decimal(&value)?);
        }
        ConvertCmd::ToHex { value } => {
            println!("{}", decimal_to_hex(&value));
        }
    }
    Ok(())
}

fn report(id: i64, updated: bool) {
    if updated {
        println!("OK: device {id} updated");
    } else {
        println!("ERR: no device with id {id}");
    }
}
