use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;

use s1bands::extract_bands;

struct CountingAlloc;

static CURRENT: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            let now = CURRENT.fetch_add(layout.size(), Ordering::SeqCst) + layout.size();
            PEAK.fetch_max(now, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        CURRENT.fetch_sub(layout.size(), Ordering::SeqCst);
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

#[test]
fn test_large_block_memory_stays_near_output_size() {
    let (rows, cols) = (1000, 1000);
    let vv = Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as f32 * 1.0e-6);
    let vh = Array2::from_shape_fn((rows, cols), |(r, c)| -((r + c) as f32) * 1.0e-3);
    let mask = Array2::from_shape_fn((rows, cols), |(r, c)| ((r + c) % 2) as u8);

    let baseline = CURRENT.load(Ordering::SeqCst);
    PEAK.store(baseline, Ordering::SeqCst);

    let rasters = extract_bands(vv.view(), vh.view(), mask.view()).unwrap();

    let peak_extra = PEAK.load(Ordering::SeqCst).saturating_sub(baseline);
    let pixels = rows * cols;
    // Outputs alone take 9 bytes per pixel (two f32 bands and one u8 band).
    println!(
        "peak extra {} bytes ({} B/pixel)",
        peak_extra,
        peak_extra / pixels
    );
    assert!(
        peak_extra < 24 * pixels,
        "peak extra {peak_extra} bytes for {pixels} pixels"
    );

    assert_eq!(rasters.get("VV").unwrap().as_f32(), Some(&vv));
    assert_eq!(rasters.get("VH").unwrap().as_f32(), Some(&vh));
    assert_eq!(rasters.get("MASK").unwrap().as_u8(), Some(&mask));
}
