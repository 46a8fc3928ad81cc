//! `critical-section` backend for a single-core Cortex-M.

use critical_section::RawRestoreState;

struct SingleCore;
critical_section::set_impl!(SingleCore);

unsafe impl critical_section::Impl for SingleCore {
    unsafe fn acquire() -> RawRestoreState {
        let was_active = cortex_m::register::primask::read().is_active();
        cortex_m::interrupt::disable();
        was_active
    }

    unsafe fn release(was_active: RawRestoreState) {
        // nested sections must leave interrupts masked
        if was_active {
            cortex_m::interrupt::enable();
        }
    }
}
