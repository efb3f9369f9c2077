//! Status LED task and the shared link / Caps Lock state it shows.
//!
//! The USB callbacks publish here; the LED task and the keyboard task read.
//! Timing policy lives in [`ps2usb::status_logic`].

use core::cell::Cell;

use defmt::{debug, info};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use ps2usb::status_logic::{led_mode, LedMode, LinkState};

static LINK_STATE: Mutex<CriticalSectionRawMutex, Cell<LinkState>> =
    Mutex::new(Cell::new(LinkState::NotMounted));
static CAPS_LOCK: Mutex<CriticalSectionRawMutex, Cell<bool>> = Mutex::new(Cell::new(false));

/// Wakes the LED task when either value above changes.
static STATUS_CHANGED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

pub fn set_link_state(state: LinkState) {
    LINK_STATE.lock(|s| s.set(state));
    STATUS_CHANGED.signal(());
}

pub fn link_state() -> LinkState {
    LINK_STATE.lock(|s| s.get())
}

pub fn set_caps_lock(on: bool) {
    let was = CAPS_LOCK.lock(|c| c.replace(on));
    if was != on {
        debug!("status: caps lock {}", on);
        STATUS_CHANGED.signal(());
    }
}

fn caps_lock() -> bool {
    CAPS_LOCK.lock(|c| c.get())
}

/// LED1 on the DK is wired active-low.
fn set_led(led: &mut Output<'static>, on: bool) {
    if on {
        led.set_low();
    } else {
        led.set_high();
    }
}

/// Drive the status LED forever.
///
/// A blink half-period restarts whenever the state changes so the new
/// pattern shows up immediately.
pub async fn led_task(mut led: Output<'static>) -> ! {
    info!("Status LED task started");

    let mut lit = false;
    loop {
        match led_mode(link_state(), caps_lock()) {
            LedMode::Solid(on) => {
                lit = on;
                set_led(&mut led, lit);
                STATUS_CHANGED.wait().await;
            }
            LedMode::Blink(ms) => {
                match select(Timer::after(Duration::from_millis(ms)), STATUS_CHANGED.wait()).await
                {
                    Either::First(()) => {
                        lit = !lit;
                        set_led(&mut led, lit);
                    }
                    Either::Second(()) => {}
                }
            }
        }
    }
}
