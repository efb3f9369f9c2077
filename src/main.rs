//! ps2usb firmware entry point.
//!
//! Tasks:
//! - `keyboard_task`: samples the PS/2 lines, decodes scancodes and queues a
//!   report every `REPORT_INTERVAL_MS` when the key state changed
//! - `usb_task`: runs the USB device stack
//! - `hid_task`: writes queued reports to the HID endpoint
//! - `led_task`: status LED

#![no_std]
#![no_main]

mod error;
mod status;
mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::config::{Config as NrfConfig, HfclkSource};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_time::{Duration, Instant};
use ps2usb::config::REPORT_INTERVAL_MS;
use ps2usb::ps2::gpio::GpioLines;
use ps2usb::status_logic::reports_enabled;
use ps2usb::{LineSampler, Ps2Keyboard};
use usb::hid_device::{self, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

type Ps2Lines = GpioLines<Input<'static>, Input<'static>>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ps2usb starting");

    // USB needs the external 32 MHz crystal.
    let mut nrf_config = NrfConfig::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    // PS/2 lines are open-collector; the keyboard only ever pulls low.
    let clock = Input::new(p.P0_29, Pull::Up);
    let data = Input::new(p.P0_30, Pull::Up);
    let lines = GpioLines::new(clock, data);

    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    let usb = hid_device::init(p.USBD);

    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(hid_task(usb.keyboard_writer)));
    unwrap!(spawner.spawn(led_task(led)));
    unwrap!(spawner.spawn(keyboard_task(lines)));
}

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_task(writer: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>) -> ! {
    hid_device::hid_writer_task(writer).await
}

#[embassy_executor::task]
async fn led_task(led: Output<'static>) -> ! {
    status::led_task(led).await
}

/// PS/2 sampling loop.
///
/// The lines are polled as fast as the executor allows. The PS/2 clock runs
/// at 10-16.7 kHz, so every other task must stay short between yields.
#[embassy_executor::task]
async fn keyboard_task(mut lines: Ps2Lines) -> ! {
    let mut keyboard = Ps2Keyboard::new();
    keyboard.init(lines.clock_level());
    info!("PS/2 keyboard task started");

    let interval = Duration::from_millis(REPORT_INTERVAL_MS);
    let mut next_report = Instant::now() + interval;

    loop {
        keyboard.poll(&mut lines);

        let now = Instant::now();
        if now >= next_report {
            next_report += interval;
            if next_report < now {
                // Fell behind (e.g. a long USB control transfer); don't burst.
                next_report = now + interval;
            }
            if reports_enabled(status::link_state()) {
                hid_device::offer_report(keyboard.state_mut());
            }
        }

        yield_now().await;
    }
}
