//! USB HID keyboard device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes a single boot-protocol keyboard endpoint.
//! GET_REPORT answers with the current key state; SET_REPORT carries
//! the host's lock LEDs.

use core::cell::Cell;

use crate::error::Error;
use crate::status;
use defmt::{debug, info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, UsbDevice};
use ps2usb::config;
use ps2usb::hid::{KeyboardLeds, KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR};
use ps2usb::state::KeyboardState;
use ps2usb::status_logic::LinkTracker;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Boot keyboard input report length.
const REPORT_LEN: usize = 8;

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_LINK_HANDLER: StaticCell<UsbLinkHandler> = StaticCell::new();
static KB_REQUEST_HANDLER: StaticCell<KeyboardRequestHandler> = StaticCell::new();

/// Keyboard task → HID writer task.
static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, KeyboardReport, { config::REPORT_QUEUE_DEPTH }> =
    Channel::new();

/// Last report handed to the writer, served on GET_REPORT.
static CURRENT_REPORT: Mutex<CriticalSectionRawMutex, Cell<KeyboardReport>> =
    Mutex::new(Cell::new(KeyboardReport::empty()));

/// Tracks configured/suspended callbacks and publishes the link state.
struct UsbLinkHandler {
    link: LinkTracker,
}

impl embassy_usb::Handler for UsbLinkHandler {
    fn configured(&mut self, configured: bool) {
        let state = self.link.set_configured(configured);
        info!("USB: configured={} -> {}", configured, state);
        status::set_link_state(state);
    }

    fn suspended(&mut self, suspended: bool) {
        let state = self.link.set_suspended(suspended);
        info!("USB: suspended={} -> {}", suspended, state);
        status::set_link_state(state);
    }
}

/// Control-pipe report requests on the keyboard interface.
struct KeyboardRequestHandler;

impl RequestHandler for KeyboardRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::In(_) => {
                let report = CURRENT_REPORT.lock(|r| r.get());
                match report.serialize(buf) {
                    0 => None,
                    n => Some(n),
                }
            }
            _ => None,
        }
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        match id {
            ReportId::Out(_) => match KeyboardLeds::from_output_report(data) {
                Some(leds) => {
                    debug!("USB: host LEDs {=u8:#x}", leds.0);
                    status::set_caps_lock(leds.caps_lock());
                    OutResponse::Accepted
                }
                // A zero-length report leaves the LEDs as they were.
                None => OutResponse::Accepted,
            },
            _ => OutResponse::Rejected,
        }
    }
}

/// Build result containing the USB device runner and the keyboard writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: HidWriter<'static, UsbDriver, REPORT_LEN>,
}

/// Initialise the USB stack and create the HID keyboard.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = false;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let link_handler = USB_LINK_HANDLER.init(UsbLinkHandler {
        link: LinkTracker::new(),
    });
    builder.handler(link_handler);

    let kb_state = KB_STATE.init(State::new());
    let request_handler = KB_REQUEST_HANDLER.init(KeyboardRequestHandler);
    let kb_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: REPORT_LEN as u16,
    };
    let keyboard_writer = HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!("USB HID keyboard initialised");

    UsbHidDevice {
        device,
        keyboard_writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// Handles enumeration, suspend/resume and control requests.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Hand the key state's pending report to the writer.
///
/// The change flag is cleared only once the report is queued, so a full
/// queue retries on the next tick instead of losing the transition.
pub fn offer_report(state: &mut KeyboardState) -> bool {
    if !state.has_changed() {
        return false;
    }
    let report = state.report();
    match REPORT_CHANNEL.try_send(report) {
        Ok(()) => {
            CURRENT_REPORT.lock(|r| r.set(report));
            state.clear_changed();
            true
        }
        Err(_) => {
            debug!("USB: report queue full, retrying");
            false
        }
    }
}

async fn write_report(
    writer: &mut HidWriter<'static, UsbDriver, REPORT_LEN>,
    report: &KeyboardReport,
) -> Result<(), Error> {
    let mut buf = [0u8; REPORT_LEN];
    let n = report.serialize(&mut buf);
    if n == 0 {
        return Err(Error::BufferOverflow);
    }
    writer.write(&buf[..n]).await?;
    Ok(())
}

/// HID report forwarding task - drains the report queue into the
/// keyboard endpoint.
pub async fn hid_writer_task(mut keyboard: HidWriter<'static, UsbDriver, REPORT_LEN>) -> ! {
    info!("HID writer task started - waiting for reports");

    loop {
        let report = REPORT_CHANNEL.receive().await;
        if let Err(e) = write_report(&mut keyboard, &report).await {
            warn!("USB keyboard write failed: {}", e);
        }
    }
}
