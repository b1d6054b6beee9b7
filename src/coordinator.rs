use crate::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelData {
    PollNow,
    Shutdown,
}

/// Runs the poll-and-decode cycle: one fetch from the indoor unit per tick,
/// decoded readings broadcast to the device sink.
#[derive(Clone)]
pub struct Coordinator {
    channels: Channels,
    decoder: Decoder,
    client: xtend::Client,
}

impl Coordinator {
    pub fn new(config: &ConfigWrapper, channels: Channels, catalog: Catalog) -> Result<Self> {
        let client = xtend::Client::new(&config.unit(), &catalog)?;

        Ok(Self {
            channels,
            decoder: Decoder::new(catalog),
            client,
        })
    }

    pub async fn start(&self) -> Result<()> {
        use ChannelData::*;

        let mut receiver = self.channels.to_coordinator.subscribe();
        info!("coordinator started");

        loop {
            match receiver.recv().await {
                Ok(PollNow) => self.poll_cycle().await,
                Ok(Shutdown) => {
                    info!("coordinator received shutdown signal");
                    break;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("coordinator lagged, missed {} messages", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        Ok(())
    }

    pub fn stop(&self) {
        let _ = self.channels.to_coordinator.send(ChannelData::Shutdown);
    }

    /// One complete cycle against a single snapshot. A transport failure
    /// abandons the cycle with no partial updates; the next scheduled tick
    /// retries.
    async fn poll_cycle(&self) {
        let sample = match self.client.fetch().await {
            Ok(sample) => sample,
            Err(err) => {
                error!("poll cycle abandoned: {}", err);
                return;
            }
        };

        let readings = self.decoder.decode_sample(&sample);
        debug!(
            "decoded {} readings from {} fields",
            readings.len(),
            sample.len()
        );

        for reading in readings {
            let _ = self
                .channels
                .to_domoticz
                .send(domoticz::ChannelData::Reading(reading));
        }
    }
}
