use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use dns_bits::cli::Args;
use dns_bits::dns;
use dns_bits::id::OsRandomId;
use dns_bits::net::UdpTransport;
use dns_bits::printer;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = args.to_config().context("unable to load configuration")?;
    debug!("config: {:?}", config);

    let query = dns::build_query(&args.domain, args.qtype, &mut OsRandomId, config.wire_mode)
        .context("unable to pack query")?;
    debug!(
        "query id {:#06x} for {} {} ({} bytes, {:?})",
        query.header.id,
        query.question.name,
        args.qtype,
        query.bytes.len(),
        config.wire_mode
    );

    printer::print(&query.bytes, config.format);

    let transport = UdpTransport::connect(config.resolver, config.timeout)
        .context("unable to dial dns server")?;

    transport
        .send(&query.bytes)
        .context("error writing request to network")?;
    info!(
        "sent {} bytes from {} to {}",
        query.bytes.len(),
        transport.local_addr()?,
        transport.peer_addr()?
    );

    let reply = transport
        .recv()
        .context("error reading response from network")?;
    info!("received {} bytes", reply.len());

    match dns::decode_dh(&reply) {
        Ok(header) if header.id != query.header.id => {
            warn!(
                "reply id {:#06x} does not match query id {:#06x}",
                header.id, query.header.id
            );
        }
        Ok(header) => debug!("reply header: {:?}", header),
        Err(e) => warn!("reply has no usable header: {}", e),
    }

    printer::print(&reply, config.format);

    Ok(())
}
