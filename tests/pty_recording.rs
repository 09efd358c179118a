//! Shell output captured through a real pseudo-terminal and replayed from the
//! screen recorder.

#[cfg(unix)]
mod pty_recording {
    use portable_pty::{native_pty_system, CommandBuilder, PtySize};
    use std::error::Error;
    use std::io::Read;
    use termlock::screen::{ScreenGeometry, ScreenRecorder};

    fn record_command(
        recorder: &mut ScreenRecorder,
        command: &str,
        args: &[&str],
    ) -> Result<(), Box<dyn Error>> {
        let pty_system = native_pty_system();
        let pair = pty_system.openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })?;

        let mut cmd = CommandBuilder::new(command);
        cmd.args(args);
        cmd.env("TERM", "xterm-256color");

        let mut child = pair.slave.spawn_command(cmd)?;
        drop(pair.slave);

        let master = pair.master;
        let mut reader = master.try_clone_reader()?;
        drop(master.take_writer()?);

        let mut buffer = [0u8; 512];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => recorder.record(&buffer[..count]),
                // EIO once the child side closes on Linux
                Err(_) => break,
            }
        }

        let status = child.wait()?;
        assert!(status.success());
        Ok(())
    }

    #[test]
    fn replay_contains_recent_output() -> Result<(), Box<dyn Error>> {
        let mut recorder = ScreenRecorder::default();
        record_command(&mut recorder, "sh", &["-c", "printf 'alpha\\nbeta\\n'"])?;

        let replay = String::from_utf8_lossy(&recorder.replay(ScreenGeometry::default()))
            .into_owned();
        assert!(replay.contains("alpha"));
        assert!(replay.contains("beta"));
        Ok(())
    }

    #[test]
    fn replay_drops_lines_above_screen() -> Result<(), Box<dyn Error>> {
        let mut recorder = ScreenRecorder::default();
        record_command(
            &mut recorder,
            "sh",
            &["-c", "i=0; while [ $i -lt 40 ]; do echo row$i; i=$((i+1)); done"],
        )?;

        let replay = String::from_utf8_lossy(&recorder.replay(ScreenGeometry {
            rows: 10,
            cols: 80,
        }))
        .into_owned();
        assert!(replay.contains("row39"));
        assert!(replay.contains("row31"));
        assert!(!replay.contains("row30\r"));
        Ok(())
    }
}
