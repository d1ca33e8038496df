//! Effects UART task
//!
//! Forwards ignition/deactivation cues to the external sound/light board
//! as newline-terminated ASCII commands, plus a periodic status line
//! carrying the engagement flag so the board can gate its animations.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use strophe_core::traits::OffReason;

use crate::channels::{is_on, EffectCommand, EFFECT_CMD};

/// Status heartbeat interval in milliseconds
const STATUS_INTERVAL_MS: u64 = 1_000;

/// Effects task - sends cue frames to the effect board
#[embassy_executor::task]
pub async fn effects_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Effects task started");

    let mut ticker = Ticker::every(Duration::from_millis(STATUS_INTERVAL_MS));

    loop {
        match select(EFFECT_CMD.wait(), ticker.next()).await {
            Either::First(cmd) => {
                let frame: &[u8] = match cmd {
                    EffectCommand::On => b"IGN\n",
                    EffectCommand::Off(OffReason::Normal) => b"OFF\n",
                    EffectCommand::Off(OffReason::Failsafe) => b"ABT\n",
                };
                if let Err(e) = tx.write_all(frame).await {
                    warn!("Failed to send effect cue: {:?}", e);
                }
            }
            Either::Second(()) => {
                let frame: &[u8] = if is_on() { b"STA 1\n" } else { b"STA 0\n" };
                if let Err(e) = tx.write_all(frame).await {
                    warn!("Failed to send status: {:?}", e);
                }
            }
        }
    }
}
