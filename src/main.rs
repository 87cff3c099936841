#![no_std]
#![no_main]

use core::cell::Cell;
use core::fmt::Write;

use defmt_rtt as _;
use embedded_hal::digital::StatefulOutputPin as _;
use heapless::String;
use panic_halt as _;
use rp2040_hal::{
    clocks::init_clocks_and_plls,
    gpio::{DynPinId, FunctionSioInput, Pin, PinState, PullUp},
    pac,
    pac::interrupt,
    sio::Sio,
    watchdog::Watchdog,
    Timer,
};
use static_cell::StaticCell;
use usb_device::{bus::UsbBus, class_prelude::*, prelude::*};
use usbd_serial::{SerialPort, USB_CLASS_CDC};

use multipress::rp2040::AlarmTimer;
use multipress::{
    elapsed_ms, Actions, ButtonConfig, ButtonRegistry, Clock, EdgeSampler, EventQueue,
    MultiPressButton, Press, SharedRegistry,
};

const CRYSTAL_FREQ: u32 = 12_000_000; // System frequency in Hz
const BLINK_INTERVAL_MS: u32 = 1_000;
const BUTTONS_MAX: usize = 2;

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

type ButtonPin = Pin<DynPinId, FunctionSioInput, PullUp>;
type Registry = ButtonRegistry<'static, ButtonPin, AlarmTimer, BUTTONS_MAX>;

// sampled from TIMER_IRQ_0, never touched by the main loop after setup
static BUTTONS: SharedRegistry<Registry> = SharedRegistry::new();

static QUEUE_A: StaticCell<EventQueue> = StaticCell::new();
static QUEUE_B: StaticCell<EventQueue> = StaticCell::new();

#[interrupt]
fn TIMER_IRQ_0() {
    BUTTONS.tick();
}

fn report<B: UsbBus>(serial: &mut SerialPort<'_, B>, button: &str, press: Press) {
    defmt::info!("button {=str}: {} press", button, press);
    let mut line: String<32> = String::new();
    if write!(line, "button {} {} press\r\n", button, press.name()).is_ok() {
        let _ = serial.write(line.as_bytes());
    }
}

#[rp2040_hal::entry]
fn main() -> ! {
    /////////////////////////////////////
    // Setup Hardware
    /////////////////////////////////////

    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Initialise System Clock
    let sys_clocks = init_clocks_and_plls(
        CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &sys_clocks);

    let sio = Sio::new(pac.SIO);
    let pins = rp2040_hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    /////////////////////////////////////
    // Setup USB
    /////////////////////////////////////

    let usb_bus = UsbBusAllocator::new(rp2040_hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        sys_clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));

    let mut serial = SerialPort::new(&usb_bus);
    let mut usb_dev = UsbDeviceBuilder::new(&usb_bus, UsbVidPid(0x16c0, 0x27dd))
        .device_class(USB_CLASS_CDC)
        .build();

    //wait for USB monitor
    loop {
        usb_dev.poll(&mut [&mut serial]);
        if serial.dtr() {
            break; // host terminal is ready
        }
    }

    /////////////////////////////////////
    // Setup Buttons
    /////////////////////////////////////

    // On-Board blinking LED
    let mut blink_pin = pins.gpio25.into_push_pull_output_in_state(PinState::High);

    // Buttons switch to ground, so the inputs idle high
    let pin_12: ButtonPin = pins.gpio12.into_pull_up_input().into_dyn_pin();
    let pin_13: ButtonPin = pins.gpio13.into_pull_up_input().into_dyn_pin();

    let config = ButtonConfig::default();
    let (writer_a, reader_a) = QUEUE_A.init(EventQueue::new()).split();
    let (writer_b, reader_b) = QUEUE_B.init(EventQueue::new()).split();

    let alarm = timer.alarm_0().unwrap();
    let mut registry: Registry = ButtonRegistry::new(AlarmTimer::new(timer, alarm));
    registry
        .register(EdgeSampler::new(pin_12, writer_a, config.debounce_ms))
        .unwrap();
    registry
        .register(EdgeSampler::new(pin_13, writer_b, config.debounce_ms))
        .unwrap();
    BUTTONS.install(registry);

    // button A reports through callbacks
    let last_press: Cell<Option<Press>> = Cell::new(None);
    let on_single = || last_press.set(Some(Press::Single));
    let on_double = || last_press.set(Some(Press::Double));
    let on_long = || last_press.set(Some(Press::Long));

    let mut button_a = MultiPressButton::new(reader_a, config);
    button_a.set_actions(
        Actions::new()
            .on_single(&on_single)
            .on_double(&on_double)
            .on_long(&on_long),
    );

    // button B is polled
    let mut button_b = MultiPressButton::new(reader_b, config);

    // only now the alarm may reach the registry
    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }
    defmt::info!("sampling {=usize} buttons", BUTTONS_MAX);

    /////////////////////////////////////
    // Main Loop
    /////////////////////////////////////

    let mut blink_last = timer.now_ms();

    loop {
        let now = timer.now_ms();

        // handle blinking LED
        if elapsed_ms(now, blink_last) >= BLINK_INTERVAL_MS {
            blink_pin.toggle().unwrap();
            blink_last = now;
        }

        // handle buttons
        button_a.process(timer.now_ms());
        button_b.process(timer.now_ms());

        if let Some(press) = last_press.take() {
            report(&mut serial, "A", press);
        }
        for press in [Press::Single, Press::Double, Press::Triple, Press::Long] {
            let pressed = match press {
                Press::Single => button_b.single_press(),
                Press::Double => button_b.double_press(),
                Press::Triple => button_b.triple_press(),
                Press::Long => button_b.long_press(),
            };
            if pressed {
                report(&mut serial, "B", press);
            }
        }

        // handle USB communication
        usb_dev.poll(&mut [&mut serial]);
    }
}
