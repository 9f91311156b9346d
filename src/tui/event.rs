use log::{debug, trace, warn};
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;

/// Which input woke the loop. Only one is reported per wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ready {
    Keyboard,
    Device,
}

/// The two inputs the event loop multiplexes.
///
/// `wait` blocks with no timeout. When both inputs are ready it must report
/// `Keyboard`; the device will be reported again on the next call.
pub trait EventSource {
    fn wait(&mut self) -> io::Result<Ready>;

    /// `Ok(None)` when the wake-up turned out to carry no byte.
    fn read_key(&mut self) -> io::Result<Option<u8>>;

    /// `Ok(0)` means the engine closed the stream.
    fn read_device(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// `poll(2)` over stdin and the kxo device.
pub struct PollSource {
    // Duplicate of fd 0, read without std's BufReader so poll and read agree
    keyboard: File,
    keyboard_open: bool,
    device: File,
}

impl PollSource {
    pub fn new(device: File) -> io::Result<Self> {
        let keyboard = File::from(io::stdin().as_fd().try_clone_to_owned()?);
        Ok(Self::with_keyboard(keyboard, device))
    }

    /// Uses `keyboard` in place of stdin. It should already be non-blocking.
    pub fn with_keyboard(keyboard: File, device: File) -> Self {
        Self {
            keyboard,
            keyboard_open: true,
            device,
        }
    }

    fn drop_keyboard(&mut self) {
        self.keyboard_open = false;
    }
}

fn is_ready(flags: Option<PollFlags>) -> bool {
    // POLLNVAL counts too; the read that follows reports the bad fd
    flags.is_some_and(|r| {
        r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR | PollFlags::POLLNVAL)
    })
}

impl EventSource for PollSource {
    fn wait(&mut self) -> io::Result<Ready> {
        loop {
            let (keyboard_ready, device_ready) = {
                let mut fds = vec![PollFd::new(self.device.as_fd(), PollFlags::POLLIN)];
                if self.keyboard_open {
                    fds.push(PollFd::new(self.keyboard.as_fd(), PollFlags::POLLIN));
                }

                let ready = poll(&mut fds, PollTimeout::NONE).map_err(io::Error::from)?;
                trace!("poll: ready={}", ready);

                let keyboard_ready = fds.get(1).is_some_and(|fd| is_ready(fd.revents()));
                (keyboard_ready, is_ready(fds[0].revents()))
            };

            if keyboard_ready {
                return Ok(Ready::Keyboard);
            }
            if device_ready {
                return Ok(Ready::Device);
            }
        }
    }

    fn read_key(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.keyboard.read(&mut byte) {
            Ok(0) => {
                warn!("stdin reached end of file, no longer listening for keys");
                self.drop_keyboard();
                Ok(None)
            }
            Ok(_) => {
                debug!("Key byte: {}", byte[0]);
                Ok(Some(byte[0]))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            // EIO, EBADF and friends do not go away; stop polling stdin
            Err(e) => {
                warn!("stdin is dead ({}), no longer listening for keys", e);
                self.drop_keyboard();
                Ok(None)
            }
        }
    }

    fn read_device(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.device.read(buf)
    }
}
