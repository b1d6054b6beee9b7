use crate::prelude::*;

pub struct Scheduler {
    config: ConfigWrapper,
    channels: Channels,
}

impl Scheduler {
    pub fn new(config: ConfigWrapper, channels: Channels) -> Self {
        Self { config, channels }
    }

    pub async fn start(&self) -> Result<()> {
        let period = std::time::Duration::from_secs(self.config.unit().poll_interval());
        info!("polling every {:?}", period);

        let mut interval = tokio::time::interval(period);
        // a slow cycle must not cause a burst of catch-up polls
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // watch our own channel so shutdown is seen between ticks
        let mut receiver = self.channels.to_coordinator.subscribe();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if self
                        .channels
                        .to_coordinator
                        .send(coordinator::ChannelData::PollNow)
                        .is_err()
                    {
                        break;
                    }
                }
                message = receiver.recv() => {
                    match message {
                        Ok(coordinator::ChannelData::Shutdown) => break,
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(_)) => {}
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        }

        Ok(())
    }
}
