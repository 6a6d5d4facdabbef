//! C bindings for the perceptual JPEG encode bridge.
//!
//! Buffers cross the boundary as opaque `guetzli_string_t*` handles (see
//! `include/guetzli.h`). A handle returned by `guetzli_string_new` or by one of
//! the `guetzli_encode_*` functions belongs to the caller, who must release it
//! with `guetzli_string_delete` exactly once.
//!
//! Encode failure is reported as a null handle; no other diagnostics cross the
//! boundary. Panics inside the encoder are caught and reported the same way.

use std::os::raw::{c_char, c_float, c_int};
use std::panic;
use std::ptr;
use std::slice;

use guetzli_core::encode::encode_raster;
use guetzli_core::normalize::{required_len, Raster, RasterLayout};
use guetzli_core::EncodedBuffer;

/// Opaque buffer handle. C sees only `struct guetzli_string_t`.
pub struct GuetzliString(EncodedBuffer);

/// Negative sizes, dimensions and strides are treated as 0.
fn to_len(value: c_int) -> usize {
    usize::try_from(value).unwrap_or(0)
}

fn into_handle(buffer: EncodedBuffer) -> *mut GuetzliString {
    Box::into_raw(Box::new(GuetzliString(buffer)))
}

/// Allocate a buffer holding `size` zeroed bytes.
#[no_mangle]
pub extern "C" fn guetzli_string_new(size: c_int) -> *mut GuetzliString {
    into_handle(EncodedBuffer::new(to_len(size)))
}

/// Free a buffer handle. Null is ignored.
///
/// # Safety
/// `p` must be null or a live handle from this library, not yet deleted.
#[no_mangle]
pub unsafe extern "C" fn guetzli_string_delete(p: *mut GuetzliString) {
    if !p.is_null() {
        drop(unsafe { Box::from_raw(p) });
    }
}

/// Resize a buffer to exactly `size` bytes.
///
/// # Safety
/// `p` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn guetzli_string_resize(p: *mut GuetzliString, size: c_int) {
    if let Some(s) = unsafe { p.as_mut() } {
        s.0.resize(to_len(size));
    }
}

/// Current length in bytes (0 for null).
///
/// # Safety
/// `p` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn guetzli_string_size(p: *mut GuetzliString) -> c_int {
    unsafe { p.as_ref() }.map_or(0, |s| c_int::try_from(s.0.len()).unwrap_or(c_int::MAX))
}

/// Pointer to the buffer bytes, valid until the next resize or delete.
///
/// # Safety
/// `p` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn guetzli_string_data(p: *mut GuetzliString) -> *mut c_char {
    match unsafe { p.as_mut() } {
        Some(s) => s.0.as_mut_slice().as_mut_ptr().cast::<c_char>(),
        None => ptr::null_mut(),
    }
}

/// Encode an 8-bit grayscale raster.
///
/// # Safety
/// `pix` must point to at least `(h - 1) * stride + w` readable bytes, where a
/// zero `stride` means `w`.
#[no_mangle]
pub unsafe extern "C" fn guetzli_encode_gray(
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    unsafe { encode(RasterLayout::Gray, pix, w, h, stride, quality) }
}

/// Encode a packed RGB raster.
///
/// # Safety
/// `pix` must point to at least `(h - 1) * stride + w * 3` readable bytes,
/// where a zero `stride` means `w * 3`.
#[no_mangle]
pub unsafe extern "C" fn guetzli_encode_rgb(
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    unsafe { encode(RasterLayout::Rgb, pix, w, h, stride, quality) }
}

/// Encode a packed RGBA raster; alpha is ignored.
///
/// # Safety
/// `pix` must point to at least `(h - 1) * stride + w * 4` readable bytes,
/// where a zero `stride` means `w * 4`.
#[no_mangle]
pub unsafe extern "C" fn guetzli_encode_rgba(
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    unsafe { encode(RasterLayout::Rgba, pix, w, h, stride, quality) }
}

/// Same as [`guetzli_encode_gray`].
///
/// # Safety
/// See [`guetzli_encode_gray`].
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn guetzliEncodeGray(
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    unsafe { guetzli_encode_gray(pix, w, h, stride, quality) }
}

/// Same as [`guetzli_encode_rgb`].
///
/// # Safety
/// See [`guetzli_encode_rgb`].
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn guetzliEncodeRGB(
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    unsafe { guetzli_encode_rgb(pix, w, h, stride, quality) }
}

/// Same as [`guetzli_encode_rgba`].
///
/// # Safety
/// See [`guetzli_encode_rgba`].
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn guetzliEncodeRGBA(
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    unsafe { guetzli_encode_rgba(pix, w, h, stride, quality) }
}

unsafe fn encode(
    layout: RasterLayout,
    pix: *const u8,
    w: c_int,
    h: c_int,
    stride: c_int,
    quality: c_float,
) -> *mut GuetzliString {
    if pix.is_null() {
        return ptr::null_mut();
    }

    let (width, height, stride) = (to_len(w), to_len(h), to_len(stride));
    let Some(len) = required_len(layout, width, height, stride) else {
        return ptr::null_mut();
    };
    let pixels = unsafe { slice::from_raw_parts(pix, len) };
    let raster = Raster::new(pixels, width, height, stride, layout);

    match panic::catch_unwind(|| encode_raster(&raster, quality)) {
        Ok(Some(buffer)) => into_handle(buffer),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            log::error!("encoder panicked on {width}x{height} {layout:?} raster");
            ptr::null_mut()
        }
    }
}
